//! CLI-specific error types

use std::io;

use thiserror::Error;

use crate::types::TypeError;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    #[error("CLI_IO_ERROR: {0}")]
    Io(#[from] io::Error),

    #[error("CLI_JSON_ERROR: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CLI_EMPTY_INPUT: no JSON value on stdin")]
    EmptyInput,

    #[error("{0}")]
    Types(#[from] TypeError),
}

impl CliError {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            CliError::Io(_) => "CLI_IO_ERROR",
            CliError::Json(_) => "CLI_JSON_ERROR",
            CliError::EmptyInput => "CLI_EMPTY_INPUT",
            CliError::Types(e) => e.code(),
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(CliError::EmptyInput.code(), "CLI_EMPTY_INPUT");
        let err = CliError::from(TypeError::UnknownType("Nope".into()));
        assert_eq!(err.code(), "UNKNOWN_TYPE");
        assert!(err.to_string().contains("Nope"));
    }
}
