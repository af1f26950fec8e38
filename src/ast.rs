use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy, Eq)]
pub enum UnaryOperator {
    #[serde(rename = "neg")]
    Negate,
    #[serde(rename = "!")]
    Not,
}

impl UnaryOperator {
    pub fn js_symbol(self) -> &'static str {
        match self {
            Self::Negate => "-",
            Self::Not => "!",
        }
    }
}

#[derive(Debug, Deserialize, PartialEq, Clone, Copy, Eq)]
pub enum BinaryOperator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = ">=")]
    GreaterEqual,
    #[serde(rename = "<")]
    Less,
    #[serde(rename = "<=")]
    LessEqual,
    #[serde(rename = "&&")]
    And,
    #[serde(rename = "||")]
    Or,
    #[serde(rename = "==")]
    Equal,
    #[serde(rename = "!=")]
    NotEqual,
}

impl BinaryOperator {
    /// Equality maps onto the strict comparisons so JavaScript never coerces operands.
    pub fn js_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::And => "&&",
            Self::Or => "||",
            Self::Equal => "===",
            Self::NotEqual => "!==",
        }
    }
}

#[derive(Debug, Deserialize, PartialEq, Clone)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expression {
    Int {
        value: i64,
    },
    String {
        value: String,
    },
    Bool {
        value: bool,
    },
    Nil,
    Var {
        name: String,
    },
    Call {
        callee: String,
        #[serde(default)]
        args: Vec<Expression>,
    },
    Unary {
        op: UnaryOperator,
        operand: Box<Expression>,
    },
    Binary {
        op: BinaryOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
}

impl Expression {
    pub fn int(value: i64) -> Self {
        Self::Int { value }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::String {
            value: value.into(),
        }
    }

    pub fn bool(value: bool) -> Self {
        Self::Bool { value }
    }

    pub fn nil() -> Self {
        Self::Nil
    }

    pub fn var(name: impl Into<String>) -> Self {
        Self::Var { name: name.into() }
    }

    pub fn call(callee: impl Into<String>, args: Vec<Expression>) -> Self {
        Self::Call {
            callee: callee.into(),
            args,
        }
    }

    pub fn unary(op: UnaryOperator, operand: Expression) -> Self {
        Self::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(op: BinaryOperator, left: Expression, right: Expression) -> Self {
        Self::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Short label used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Int { .. } => "int literal",
            Self::String { .. } => "string literal",
            Self::Bool { .. } => "bool literal",
            Self::Nil => "nil literal",
            Self::Var { .. } => "variable reference",
            Self::Call { .. } => "call",
            Self::Unary { .. } => "unary operation",
            Self::Binary { .. } => "binary operation",
        }
    }
}

#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct Assignment {
    pub name: String,
    pub value: Expression,
}

impl Assignment {
    pub fn new(name: impl Into<String>, value: Expression) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

#[derive(Debug, Deserialize, PartialEq, Clone)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Statement {
    VarDecl {
        name: String,
    },
    Assign(Assignment),
    Expr {
        call: Expression,
    },
    Return {
        #[serde(default)]
        value: Option<Expression>,
    },
    If {
        condition: Expression,
        #[serde(default)]
        then_body: Vec<Statement>,
        #[serde(default)]
        else_body: Option<Vec<Statement>>,
    },
    For {
        init: Assignment,
        condition: Expression,
        update: Assignment,
        #[serde(default)]
        body: Vec<Statement>,
    },
}

#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct Function {
    pub name: String,
    #[serde(default)]
    pub params: Vec<String>,
    #[serde(default)]
    pub body: Vec<Statement>,
}

#[derive(Debug, Deserialize, PartialEq, Clone, Default)]
pub struct Program {
    #[serde(default)]
    pub functions: Vec<Function>,
}

impl Program {
    /// Decodes a program handed over by an external parser. JSON input is accepted
    /// as well since every JSON document is valid YAML.
    pub fn from_yaml_str(source: &str) -> Result<Self, crate::error::LoadError> {
        Ok(serde_yaml::from_str(source)?)
    }
}
