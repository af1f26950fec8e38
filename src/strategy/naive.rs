use super::Strategy;
use crate::ast::Expression;
use crate::translator::buffer::TokenSink;
use crate::translator::role::ExprRole;

/// Wraps deferrable expressions in bare closures and forces them on every read.
///
/// A binding read twice runs its defining expression twice.
pub struct NaiveThunk;

impl Strategy for NaiveThunk {
    fn before_expr(&mut self, out: &mut dyn TokenSink, _expr: &Expression, role: ExprRole) {
        if role.is_deferrable() {
            out.append("() => ");
        }
    }

    fn after_variable_read(&mut self, out: &mut dyn TokenSink) {
        out.append("()");
    }

    fn after_call(&mut self, out: &mut dyn TokenSink) {
        out.append("?.()");
    }
}
