//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add printer-level conditions.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("progress total must be greater than zero (current: {current})")]
    ZeroTotal { current: u64 },

    /// Raised after an `err`/`fatal` call asked to stop the program.
    /// The entry point decides how to exit.
    #[error("{message}")]
    Interrupted { message: String },

    #[error("config error: {message}")]
    Config { message: String },
}

impl ApplicationError {
    pub fn is_interrupt(&self) -> bool {
        matches!(self, ApplicationError::Interrupted { .. })
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
