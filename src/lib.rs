pub mod ast;
pub mod config;
pub mod error;
pub mod free_vars;
pub mod strategy;
pub mod translator;

pub use config::Config;
pub use error::{ConfigError, LoadError, TranslateError};
pub use strategy::StrategyKind;
pub use translator::{Translator, translate};
