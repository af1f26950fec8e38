use thiserror::Error;

/// Errors raised while walking a program and writing JavaScript to the sink.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("Unsupported construct: {construct} in function '{function}'")]
    UnsupportedConstruct { construct: String, function: String },
    #[error("Writing translated output failed")]
    Io(#[from] std::io::Error),
}

pub type TranslateResult<T> = Result<T, TranslateError>;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Invalid program document: {0}")]
    Decode(#[from] serde_yaml::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "Unknown strategy '{name}' (expected eager, naive_thunk, memoized_thunk or snapshot_cell)"
    )]
    UnknownStrategy { name: String },
    #[error("Invalid configuration document: {0}")]
    Decode(#[from] serde_yaml::Error),
    #[error("Reading configuration file {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
