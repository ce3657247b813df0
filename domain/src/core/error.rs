//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Unknown commander: {0}")]
    UnknownCommander(String),

    #[error("No eligible cards for commander '{commander}' with tribal type '{tribal_type}'")]
    EmptyPool {
        commander: String,
        tribal_type: String,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl DomainError {
    /// Whether the caller can reasonably retry with different input
    /// (e.g. re-prompt for the commander name).
    pub fn is_recoverable(&self) -> bool {
        matches!(self, DomainError::UnknownCommander(_))
    }
}
