use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::ast::Expression;
use crate::error::ConfigError;
use crate::translator::buffer::TokenSink;
use crate::translator::role::ExprRole;

pub mod eager;
pub mod memoized;
pub mod naive;
pub mod snapshot;

/// Extension points the walker calls while emitting.
///
/// Every hook defaults to the eager behavior, so a strategy only overrides the
/// places where it defers, memoizes or routes values through cells. Hooks may
/// append tokens to the current line but never end it.
pub trait Strategy {
    /// Helper source written verbatim ahead of the first function.
    fn preamble(&self) -> Option<&'static str> {
        None
    }

    fn before_expr(&mut self, _out: &mut dyn TokenSink, _expr: &Expression, _role: ExprRole) {}

    fn after_expr(&mut self, _out: &mut dyn TokenSink, _expr: &Expression, _role: ExprRole) {}

    fn after_variable_read(&mut self, _out: &mut dyn TokenSink) {}

    /// Never invoked for `print`, whose result is not a deferred value.
    fn after_call(&mut self, _out: &mut dyn TokenSink) {}

    fn after_var_decl(&mut self, _out: &mut dyn TokenSink) {}

    fn before_assignment_rhs(&mut self, out: &mut dyn TokenSink) {
        out.append(" = ");
    }

    fn after_assignment_rhs(&mut self, _out: &mut dyn TokenSink) {}
}

/// Selects the evaluation strategy for one translation.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Eager,
    NaiveThunk,
    MemoizedThunk,
    #[default]
    SnapshotCell,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 4] = [
        Self::Eager,
        Self::NaiveThunk,
        Self::MemoizedThunk,
        Self::SnapshotCell,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Eager => "eager",
            Self::NaiveThunk => "naive_thunk",
            Self::MemoizedThunk => "memoized_thunk",
            Self::SnapshotCell => "snapshot_cell",
        }
    }

    /// Fresh hook state for a single compilation.
    pub fn build(self) -> Box<dyn Strategy> {
        match self {
            Self::Eager => Box::new(eager::Eager),
            Self::NaiveThunk => Box::new(naive::NaiveThunk),
            Self::MemoizedThunk => Box::new(memoized::MemoizedThunk),
            Self::SnapshotCell => Box::new(snapshot::SnapshotCell::new()),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = ConfigError;

    /// Accepts the snake_case names, their hyphenated spelling, and the numeric
    /// step aliases `0` through `3`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.replace('-', "_").as_str() {
            "eager" | "0" => Ok(Self::Eager),
            "naive_thunk" | "naive" | "1" => Ok(Self::NaiveThunk),
            "memoized_thunk" | "memoized" | "2" => Ok(Self::MemoizedThunk),
            "snapshot_cell" | "snapshot" | "3" => Ok(Self::SnapshotCell),
            _ => Err(ConfigError::UnknownStrategy {
                name: value.to_string(),
            }),
        }
    }
}
