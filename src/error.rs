use std::path::PathBuf;

/// Errors that stop the application from starting or running.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("ui event loop failed: {0}")]
    Ui(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
