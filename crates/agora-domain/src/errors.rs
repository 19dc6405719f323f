//! Domain errors

use thiserror::Error;

/// Unexpected failures raised by entity mutators
///
/// Recoverable validation failures do not use this type; they surface as
/// `Ok(false)` with detail in the entity's error map.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid payload: {reason}")]
    InvalidPayload { reason: String },

    #[error("invalid entity state: {reason}")]
    InvalidState { reason: String },

    #[error("counter underflow: {counter}")]
    CounterUnderflow { counter: String },
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
