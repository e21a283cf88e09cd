//! Formula error types

use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur while reading formula text
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormulaError {
    /// Formula text could not be tokenized
    #[error("Parse error at byte {position}: {message}")]
    Parse { position: usize, message: String },
}

impl FormulaError {
    pub(crate) fn parse(position: usize, message: impl Into<String>) -> Self {
        FormulaError::Parse {
            position,
            message: message.into(),
        }
    }
}

impl From<FormulaError> for purple_headers_core::Error {
    fn from(err: FormulaError) -> Self {
        purple_headers_core::Error::FormulaParse(err.to_string())
    }
}
