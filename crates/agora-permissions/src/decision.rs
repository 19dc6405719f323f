//! The tri-state decision value

use serde::{Deserialize, Serialize};

/// Vote returned by every decider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    /// The operation is permitted
    Allow,
    /// The operation is forbidden
    Deny,
    /// The decider has no opinion on this question
    Abstain,
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, Decision::Deny)
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Decision::Allow => write!(f, "allow"),
            Decision::Deny => write!(f, "deny"),
            Decision::Abstain => write!(f, "abstain"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Decision::Allow.to_string(), "allow");
        assert_eq!(Decision::Deny.to_string(), "deny");
        assert_eq!(Decision::Abstain.to_string(), "abstain");
    }

    #[test]
    fn test_predicates() {
        assert!(Decision::Allow.is_allowed());
        assert!(!Decision::Allow.is_denied());
        assert!(Decision::Deny.is_denied());
        assert!(!Decision::Abstain.is_allowed());
        assert!(!Decision::Abstain.is_denied());
    }

    #[test]
    fn test_serialization() {
        assert_eq!(serde_json::to_string(&Decision::Abstain).unwrap(), "\"abstain\"");
        let back: Decision = serde_json::from_str("\"deny\"").unwrap();
        assert_eq!(back, Decision::Deny);
    }
}
