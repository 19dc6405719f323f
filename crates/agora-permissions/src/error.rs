//! Error types for the permission subsystem

use thiserror::Error;

/// Result type for permission operations
pub type PermissionResult<T> = std::result::Result<T, PermissionError>;

/// Errors a decider may surface
///
/// The built-in deciders are infallible; these exist so user-supplied
/// policies can report lookup failures for the checker to collapse to Deny.
#[derive(Error, Debug)]
pub enum PermissionError {
    #[error("decider failure: {reason}")]
    Decider { reason: String },

    #[error("policy lookup failed: {0}")]
    Lookup(String),
}
