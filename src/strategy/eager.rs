use super::Strategy;

/// Baseline: every expression is evaluated where it appears.
pub struct Eager;

impl Strategy for Eager {}
