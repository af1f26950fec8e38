/// Syntactic position an expression is emitted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprRole {
    AssignmentRhs,
    CallArgument,
    ReturnValue,
    InnerOperand,
    /// Conditions and `print` arguments: evaluated on the spot.
    Eager,
}

impl ExprRole {
    pub fn is_top_level(self) -> bool {
        self != Self::InnerOperand
    }

    /// Values bound to a name or passed across a call may be forced more than once.
    pub fn needs_memoization(self) -> bool {
        matches!(self, Self::AssignmentRhs | Self::CallArgument)
    }

    /// Top-level and not eager: a deferring strategy may wrap it.
    pub fn is_deferrable(self) -> bool {
        self.is_top_level() && self != Self::Eager
    }
}
