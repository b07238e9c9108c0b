//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent usage mistakes: names that do not map to a
/// known level, color token, format mode or alignment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid log level: {0} (expected one of DEBUG, INFO, WARNING, ERROR, FATAL)")]
    InvalidLevel(String),

    #[error("invalid color token: {0}")]
    InvalidColor(String),

    #[error("invalid format mode: {0} (expected one of auto, raw, json, pretty)")]
    InvalidFormatMode(String),

    #[error("invalid alignment: {0} (expected one of left, right, center)")]
    InvalidAlign(String),

    #[error("invalid escape sequence: {0}")]
    InvalidEscape(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
