//! CLI error types

use kf_core::KfError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors from resource operations print exactly as reported.
    #[error(transparent)]
    Core(#[from] KfError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("operation timed out after {0}s")]
    Timeout(u64),

    #[error("{0}")]
    Message(String),
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Message(format!("Failed to encode output: {err}"))
    }
}

pub type CliResult<T> = Result<T, CliError>;
