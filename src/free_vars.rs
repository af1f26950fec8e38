use std::collections::BTreeSet;

use crate::ast::Expression;

/// Names of every variable read anywhere inside `expr`.
///
/// The set is ordered so capture lists come out the same on every run.
pub fn free_variables(expr: &Expression) -> BTreeSet<&str> {
    let mut names = BTreeSet::new();
    collect(expr, &mut names);
    names
}

fn collect<'a>(expr: &'a Expression, names: &mut BTreeSet<&'a str>) {
    match expr {
        Expression::Var { name } => {
            names.insert(name.as_str());
        }
        Expression::Call { args, .. } => {
            for arg in args {
                collect(arg, names);
            }
        }
        Expression::Unary { operand, .. } => collect(operand, names),
        Expression::Binary { left, right, .. } => {
            collect(left, names);
            collect(right, names);
        }
        Expression::Int { .. }
        | Expression::String { .. }
        | Expression::Bool { .. }
        | Expression::Nil => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOperator, UnaryOperator};

    #[test]
    fn literals_have_no_free_variables() {
        assert!(free_variables(&Expression::int(3)).is_empty());
        assert!(free_variables(&Expression::string("i")).is_empty());
        assert!(free_variables(&Expression::Nil).is_empty());
    }

    #[test]
    fn collects_through_calls_and_operators() {
        let expr = Expression::binary(
            BinaryOperator::Add,
            Expression::call(
                "f",
                vec![
                    Expression::var("b"),
                    Expression::unary(UnaryOperator::Negate, Expression::var("a")),
                ],
            ),
            Expression::binary(BinaryOperator::Mul, Expression::var("b"), Expression::int(2)),
        );
        let names = free_variables(&expr).into_iter().collect::<Vec<_>>();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn callee_name_is_not_a_variable() {
        let expr = Expression::call("counter", Vec::new());
        assert!(free_variables(&expr).is_empty());
    }
}
