use super::Strategy;
use crate::ast::Expression;
use crate::translator::buffer::TokenSink;
use crate::translator::js_runtime::{JS_MEMO_HELPER, MEMO_HELPER_NAME};
use crate::translator::role::ExprRole;

/// Like [`super::naive::NaiveThunk`], but bindings and arguments go through
/// `lazy_hlp`, which caches the first result.
pub struct MemoizedThunk;

impl Strategy for MemoizedThunk {
    fn preamble(&self) -> Option<&'static str> {
        Some(JS_MEMO_HELPER)
    }

    fn before_expr(&mut self, out: &mut dyn TokenSink, _expr: &Expression, role: ExprRole) {
        if role.needs_memoization() {
            out.append(MEMO_HELPER_NAME);
            out.append("(() => ");
        } else if role.is_deferrable() {
            out.append("() => ");
        }
    }

    fn after_expr(&mut self, out: &mut dyn TokenSink, _expr: &Expression, role: ExprRole) {
        if role.needs_memoization() {
            out.append(")");
        }
    }

    fn after_variable_read(&mut self, out: &mut dyn TokenSink) {
        out.append("()");
    }

    fn after_call(&mut self, out: &mut dyn TokenSink) {
        out.append("?.()");
    }
}
