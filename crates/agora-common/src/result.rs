//! Uniform operation result

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Structured map keyed by field name or error tag
pub type ErrorMap = Map<String, Value>;

/// Input payload for create/edit operations
pub type Payload = Map<String, Value>;

/// Success/error outcome returned by every service operation
///
/// Constructed once per call through the factories below and immutable
/// thereafter. `errors` is populated only on failure; an empty error map on
/// a failed result represents a silently vetoed operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpResult {
    pub succeeded: bool,
    pub errors: ErrorMap,
    pub data: ErrorMap,
}

impl OpResult {
    /// Successful outcome carrying no data
    pub fn success() -> Self {
        Self {
            succeeded: true,
            errors: ErrorMap::new(),
            data: ErrorMap::new(),
        }
    }

    /// Successful outcome carrying result data
    pub fn success_with(data: ErrorMap) -> Self {
        Self {
            succeeded: true,
            errors: ErrorMap::new(),
            data,
        }
    }

    /// Failed outcome carrying structured error detail
    pub fn error(errors: ErrorMap) -> Self {
        Self {
            succeeded: false,
            errors,
            data: ErrorMap::new(),
        }
    }

    /// Failed outcome with a single error entry
    pub fn error_entry(key: &str, value: Value) -> Self {
        let mut errors = ErrorMap::new();
        errors.insert(key.to_string(), value);
        Self::error(errors)
    }

    /// Silently vetoed outcome: failed, with no error detail
    pub fn rejected() -> Self {
        Self::error(ErrorMap::new())
    }

    /// Whether the result represents a veto (failed with empty errors)
    pub fn is_rejection(&self) -> bool {
        !self.succeeded && self.errors.is_empty()
    }
}
