//! Service operation errors
//!
//! These never cross a service's public boundary: the envelope absorbs
//! every variant into the uniform result.

use thiserror::Error;

use agora_common::ErrorMap;
use agora_domain::DomainError;

/// Result type used inside operation bodies
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

/// Failure taxonomy of a service operation
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Entity state fails a required invariant; carries a message key
    #[error("precondition failed: {key}")]
    Precondition { key: String },

    /// The entity's own mutating method reported failure
    #[error("entity validation failed")]
    Validation(ErrorMap),

    /// A secondary-effect mutation (counter update) failed
    #[error("infrastructure failure: {0}")]
    Infrastructure(String),

    /// Unexpected failure from the domain layer
    #[error(transparent)]
    Domain(#[from] DomainError),
}
