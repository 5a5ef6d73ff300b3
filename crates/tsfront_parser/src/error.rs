//! Failures that stop a parse before a tree exists.
//!
//! Syntax errors never end up here; they are diagnostics on the returned
//! [`SourceFile`](crate::SourceFile).

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("{file_name}: source is not valid UTF-8")]
    InvalidUtf8 { file_name: String },

    #[error("internal parser error: {message}")]
    Internal { message: String },

    #[error("invalid parse options: {0}")]
    Options(String),
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        ParseError::Options(err.to_string())
    }
}
