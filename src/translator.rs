use std::io::Write;

use self::buffer::{EmitBuffer, TokenSink};
use self::js_runtime::{JS_NIL, JS_PRINT, PRINT_BUILTIN, escape_js_string};
use self::role::ExprRole;
use crate::ast::{Assignment, Expression, Function, Program, Statement};
use crate::config::Config;
use crate::error::{TranslateError, TranslateResult};
use crate::strategy::{Strategy, StrategyKind};

pub mod buffer;
pub mod js_runtime;
pub mod role;

/// Translates programs to JavaScript under the configured evaluation strategy.
///
/// Each call to [`Translator::translate`] walks the whole program once with
/// fresh strategy state, so translating the same program twice yields the same
/// bytes.
pub struct Translator {
    config: Config,
}

impl Translator {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Lines are written as soon as they are complete; on error the sink keeps
    /// whatever was emitted before the offending node.
    pub fn translate<W: Write>(&self, program: &Program, sink: W) -> TranslateResult<()> {
        log::info!(
            "translating {} function(s) with the {} strategy",
            program.functions.len(),
            self.config.strategy
        );
        let mut emitter = Emitter {
            out: EmitBuffer::new(sink),
            strategy: self.config.strategy.build(),
            function: String::new(),
        };
        emitter.emit_program(program, &self.config.entry_point)
    }

    pub fn translate_to_string(&self, program: &Program) -> TranslateResult<String> {
        let mut output = Vec::new();
        self.translate(program, &mut output)?;
        Ok(String::from_utf8_lossy(&output).into_owned())
    }
}

/// Translates with the default entry point.
pub fn translate<W: Write>(
    program: &Program,
    strategy: StrategyKind,
    sink: W,
) -> TranslateResult<()> {
    Translator::new(Config::with_strategy(strategy)).translate(program, sink)
}

struct Emitter<W: Write> {
    out: EmitBuffer<W>,
    strategy: Box<dyn Strategy>,
    /// Function being emitted, for diagnostics.
    function: String,
}

impl<W: Write> Emitter<W> {
    fn emit_program(&mut self, program: &Program, entry_point: &str) -> TranslateResult<()> {
        if let Some(preamble) = self.strategy.preamble() {
            self.out.write_verbatim(preamble)?;
            self.out.write_verbatim("\n")?;
        }

        for function in &program.functions {
            self.emit_function(function)?;
            self.out.flush_line(false, false)?;
        }

        self.out.append(entry_point);
        self.out.append("();");
        self.out.flush_line(false, false)?;
        Ok(())
    }

    fn emit_function(&mut self, function: &Function) -> TranslateResult<()> {
        log::debug!(
            "emitting function {}({}) with {} statement(s)",
            function.name,
            function.params.join(", "),
            function.body.len()
        );
        self.function.clone_from(&function.name);

        self.out.append("function ");
        self.out.append(&function.name);
        self.out.append("(");
        self.out.append(&function.params.join(", "));
        self.out.append(")");
        self.emit_block(&function.body)
    }

    fn emit_block(&mut self, statements: &[Statement]) -> TranslateResult<()> {
        self.out.append(" {");
        self.out.flush_line(true, false)?;

        for statement in statements {
            self.emit_statement(statement)?;
        }

        self.out.append("}");
        self.out.flush_line(false, true)?;
        Ok(())
    }

    fn emit_statement(&mut self, statement: &Statement) -> TranslateResult<()> {
        match statement {
            Statement::VarDecl { name } => {
                self.out.append("var ");
                self.out.append(name);
                self.strategy.after_var_decl(&mut self.out);
                self.end_statement()?;
            }
            Statement::Assign(assignment) => {
                self.emit_assignment(assignment)?;
                self.end_statement()?;
            }
            Statement::Expr { call } => {
                if !matches!(call, Expression::Call { .. }) {
                    return Err(self.unsupported(format!(
                        "{} used as a statement",
                        call.kind_name()
                    )));
                }
                self.emit_expression(call, ExprRole::Eager)?;
                self.end_statement()?;
            }
            Statement::Return { value } => {
                self.out.append("return");
                if let Some(value) = value {
                    self.out.append(" ");
                    self.emit_expression(value, ExprRole::ReturnValue)?;
                }
                self.end_statement()?;
            }
            Statement::If {
                condition,
                then_body,
                else_body,
            } => {
                self.out.append("if (");
                self.emit_expression(condition, ExprRole::Eager)?;
                self.out.append(")");
                self.emit_block(then_body)?;

                if let Some(else_body) = else_body {
                    self.out.append("else");
                    self.emit_block(else_body)?;
                }
            }
            Statement::For {
                init,
                condition,
                update,
                body,
            } => {
                self.out.append("for (");
                self.emit_assignment(init)?;
                self.out.append("; ");
                self.emit_expression(condition, ExprRole::Eager)?;
                self.out.append("; ");
                self.emit_assignment(update)?;
                self.out.append(")");
                self.emit_block(body)?;
            }
        }
        Ok(())
    }

    fn end_statement(&mut self) -> TranslateResult<()> {
        self.out.append(";");
        self.out.flush_line(false, false)?;
        Ok(())
    }

    /// Emits `name <op> rhs` without a terminator so `for` headers can reuse it.
    fn emit_assignment(&mut self, assignment: &Assignment) -> TranslateResult<()> {
        self.out.append(&assignment.name);
        self.strategy.before_assignment_rhs(&mut self.out);
        self.emit_expression(&assignment.value, ExprRole::AssignmentRhs)?;
        self.strategy.after_assignment_rhs(&mut self.out);
        Ok(())
    }

    fn emit_expression(&mut self, expr: &Expression, role: ExprRole) -> TranslateResult<()> {
        self.strategy.before_expr(&mut self.out, expr, role);

        match expr {
            // A nested negative literal keeps its sign away from a preceding `-`.
            Expression::Int { value } if *value < 0 => {
                self.open_group(role);
                self.out.append(&value.to_string());
                self.close_group(role);
            }
            Expression::Int { value } => self.out.append(&value.to_string()),
            Expression::String { value } => {
                self.out.append("\"");
                self.out.append(&escape_js_string(value));
                self.out.append("\"");
            }
            Expression::Bool { value } => self.out.append(if *value { "true" } else { "false" }),
            Expression::Nil => self.out.append(JS_NIL),
            Expression::Var { name } => {
                self.out.append(name);
                self.strategy.after_variable_read(&mut self.out);
            }
            Expression::Call { callee, args } => self.emit_call(callee, args)?,
            // Nested operations are always parenthesized, whatever the precedence.
            Expression::Unary { op, operand } => {
                self.open_group(role);
                self.out.append(op.js_symbol());
                self.emit_expression(operand, ExprRole::InnerOperand)?;
                self.close_group(role);
            }
            Expression::Binary { op, left, right } => {
                self.open_group(role);
                self.emit_expression(left, ExprRole::InnerOperand)?;
                self.out.append(" ");
                self.out.append(op.js_symbol());
                self.out.append(" ");
                self.emit_expression(right, ExprRole::InnerOperand)?;
                self.close_group(role);
            }
        }

        self.strategy.after_expr(&mut self.out, expr, role);
        Ok(())
    }

    /// `print` maps to the console and evaluates its arguments on the spot so
    /// output is never delayed.
    fn emit_call(&mut self, callee: &str, args: &[Expression]) -> TranslateResult<()> {
        let is_print = callee == PRINT_BUILTIN;
        self.out.append(if is_print { JS_PRINT } else { callee });
        self.out.append("(");

        let arg_role = if is_print {
            ExprRole::Eager
        } else {
            ExprRole::CallArgument
        };
        for (index, arg) in args.iter().enumerate() {
            if index > 0 {
                self.out.append(", ");
            }
            self.emit_expression(arg, arg_role)?;
        }

        self.out.append(")");
        if !is_print {
            self.strategy.after_call(&mut self.out);
        }
        Ok(())
    }

    fn open_group(&mut self, role: ExprRole) {
        if !role.is_top_level() {
            self.out.append("(");
        }
    }

    fn close_group(&mut self, role: ExprRole) {
        if !role.is_top_level() {
            self.out.append(")");
        }
    }

    fn unsupported(&self, construct: String) -> TranslateError {
        TranslateError::UnsupportedConstruct {
            construct,
            function: self.function.clone(),
        }
    }
}
