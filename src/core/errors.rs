use std::result::Result as StdResult;

use thiserror::Error;

/// Unified error type for the storage, configuration and loading layers.
#[derive(Error, Debug)]
pub enum FinanceError {
    #[error("No data loaded")]
    NotLoaded,
    #[error("Load cancelled")]
    Cancelled,
    #[error("Persistence error: {0}")]
    StorageError(String),
    #[error("Malformed document: {0}")]
    Malformed(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = StdResult<T, FinanceError>;

/// User-facing CLI error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] FinanceError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
}

impl From<std::io::Error> for FinanceError {
    fn from(err: std::io::Error) -> Self {
        FinanceError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for FinanceError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            FinanceError::StorageError(err.to_string())
        } else {
            FinanceError::Malformed(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_errors_map_to_malformed() {
        let err = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err();
        assert!(matches!(FinanceError::from(err), FinanceError::Malformed(_)));
    }
}
