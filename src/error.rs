//! Error types for remind-md.

use thiserror::Error;

/// Per-entry parse errors. These never abort a pass: the offending
/// line is kept verbatim in the document and reported alongside it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TagError {
    #[error("malformed tag: {0}")]
    Malformed(String),

    #[error("offset {offset} must be less than period {period}")]
    InvalidOffset { offset: i64, period: i64 },
}

/// Errors that abort an operation.
#[derive(Error, Debug)]
pub enum RemindError {
    #[error("document I/O error: {0}")]
    DocumentIo(#[from] std::io::Error),

    #[error("delivery failed for '{title}': {reason}")]
    Delivery { title: String, reason: String },

    #[error("invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("invalid tag: {0}")]
    Tag(#[from] TagError),

    #[error("{0}")]
    Usage(String),
}

/// Result type alias for remind-md operations.
pub type RemindResult<T> = Result<T, RemindError>;
