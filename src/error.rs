use thiserror::Error;

pub type Result<T> = std::result::Result<T, GameError>;

/// Configuration and level-data failures.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("unknown level {index} (have {available})")]
    UnknownLevel { index: u32, available: usize },

    #[error("level set contains no levels")]
    EmptyLevelSet,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error in {path}: {message}")]
    Parse { path: String, message: String },

    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
