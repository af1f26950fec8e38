use std::collections::HashMap;
use std::ptr;

use super::Strategy;
use crate::ast::Expression;
use crate::free_vars::free_variables;
use crate::translator::buffer::TokenSink;
use crate::translator::js_runtime::{CELL_HELPER_NAME, JS_CELL_HELPER};
use crate::translator::role::ExprRole;

/// Address of an expression node, valid while the walker borrows the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct NodeId(usize);

impl NodeId {
    fn of(expr: &Expression) -> Self {
        Self(ptr::from_ref(expr) as usize)
    }
}

/// Every variable is a `make_val` cell with `get`, `set` and `snap`.
///
/// An assignment's deferred right-hand side receives a snapshot of each cell it
/// reads, taken when the assignment runs. A thunk built inside a loop therefore
/// sees the induction variable as it was on that iteration instead of its final
/// value.
pub struct SnapshotCell {
    captures: HashMap<NodeId, Vec<String>>,
}

impl SnapshotCell {
    pub fn new() -> Self {
        Self {
            captures: HashMap::new(),
        }
    }
}

impl Default for SnapshotCell {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for SnapshotCell {
    fn preamble(&self) -> Option<&'static str> {
        Some(JS_CELL_HELPER)
    }

    fn before_expr(&mut self, out: &mut dyn TokenSink, expr: &Expression, role: ExprRole) {
        if !role.is_deferrable() {
            return;
        }
        if role == ExprRole::AssignmentRhs {
            let names = free_variables(expr)
                .into_iter()
                .map(str::to_string)
                .collect::<Vec<_>>();
            if !names.is_empty() {
                log::trace!("capturing {names:?} by snapshot");
                out.append("((");
                out.append(&names.join(", "));
                out.append(") => ");
                self.captures.insert(NodeId::of(expr), names);
            }
        } else if role.needs_memoization() {
            out.append(CELL_HELPER_NAME);
            out.append("().set(");
        }
        out.append("() => ");
    }

    fn after_expr(&mut self, out: &mut dyn TokenSink, expr: &Expression, role: ExprRole) {
        if role == ExprRole::AssignmentRhs {
            if let Some(names) = self.captures.remove(&NodeId::of(expr)) {
                let snapshots = names
                    .iter()
                    .map(|name| format!("{name}.snap()"))
                    .collect::<Vec<_>>();
                out.append(")(");
                out.append(&snapshots.join(", "));
                out.append(")");
            }
        } else if role.needs_memoization() {
            out.append(")");
        }
    }

    fn after_variable_read(&mut self, out: &mut dyn TokenSink) {
        out.append(".get()");
    }

    fn after_call(&mut self, out: &mut dyn TokenSink) {
        out.append("?.()");
    }

    fn after_var_decl(&mut self, out: &mut dyn TokenSink) {
        out.append(" = ");
        out.append(CELL_HELPER_NAME);
        out.append("()");
    }

    fn before_assignment_rhs(&mut self, out: &mut dyn TokenSink) {
        out.append(".set(");
    }

    fn after_assignment_rhs(&mut self, out: &mut dyn TokenSink) {
        out.append(")");
    }
}
