//! Query construction error types.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    /// A recognized parameter carried a value of the wrong type.
    ///
    /// Never escapes [`super::SearchParameters`] construction; the field keeps
    /// its default instead.
    #[error("Invalid value {value:?} for parameter '{key}' (expected {expected})")]
    InvalidParameter {
        key: String,
        value: String,
        expected: &'static str,
    },

    /// The assembled query is not a representable backend URL.
    #[error("Failed to encode search query: {0}")]
    Encoding(String),
}
