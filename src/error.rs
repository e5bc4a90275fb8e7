//! Error types for Tansy.

use thiserror::Error;

/// Error type for all Tansy operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TansyError {
    /// A document id is negative, already in use, or does not exist.
    #[error("Invalid document id: {0}")]
    InvalidDocumentId(String),

    /// A text or a token contains control characters.
    #[error("Invalid text: {0}")]
    InvalidText(String),

    /// Raw query text with a trailing `-` or a repeated `--`.
    #[error("Invalid query syntax: {0}")]
    InvalidQuerySyntax(String),

    /// A zero-length query token after minus-stripping.
    #[error("Empty word: {0}")]
    EmptyWord(String),
}

impl TansyError {
    /// Create an invalid document id error.
    pub fn invalid_document_id<S: Into<String>>(message: S) -> Self {
        TansyError::InvalidDocumentId(message.into())
    }

    /// Create an invalid text error.
    pub fn invalid_text<S: Into<String>>(message: S) -> Self {
        TansyError::InvalidText(message.into())
    }

    /// Create an invalid query syntax error.
    pub fn invalid_query_syntax<S: Into<String>>(message: S) -> Self {
        TansyError::InvalidQuerySyntax(message.into())
    }

    /// Create an empty word error.
    pub fn empty_word<S: Into<String>>(message: S) -> Self {
        TansyError::EmptyWord(message.into())
    }
}

/// Result type alias using TansyError.
pub type Result<T> = std::result::Result<T, TansyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TansyError::invalid_document_id("id -1 is negative");
        assert_eq!(err.to_string(), "Invalid document id: id -1 is negative");

        let err = TansyError::invalid_query_syntax("trailing minus");
        assert_eq!(err.to_string(), "Invalid query syntax: trailing minus");
    }
}
