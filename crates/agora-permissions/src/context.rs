//! Request-scoped context a decider votes on

use serde::{Deserialize, Serialize};

/// The operation kind under authorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Create => write!(f, "create"),
            Action::Read => write!(f, "read"),
            Action::Update => write!(f, "update"),
            Action::Delete => write!(f, "delete"),
        }
    }
}

/// The entity being authorized
///
/// Implemented by forum aggregates (threads, posts). The group list is the
/// subject's own access restriction: empty means no restriction configured.
pub trait Subject: Send + Sync {
    /// Entity kind tag, e.g. `"thread"`
    fn kind(&self) -> &'static str;

    /// Identity of the authoring member, when the entity has one
    fn author_id(&self) -> Option<u64>;

    /// Groups allowed to act on this subject; empty means unrestricted
    fn allowed_group_ids(&self) -> Vec<u64>;
}

/// The acting principal
pub trait Principal: Send + Sync {
    /// Identity of the principal
    fn principal_id(&self) -> u64;

    /// Whether the principal belongs to the given group
    fn in_group(&self, group_id: u64) -> bool;

    /// The principal's own role-membership query for `(subject, action)`
    fn has_role(&self, subject: Option<&dyn Subject>, action: Option<Action>) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_display() {
        assert_eq!(Action::Create.to_string(), "create");
        assert_eq!(Action::Delete.to_string(), "delete");
    }

    #[test]
    fn test_action_serialization() {
        assert_eq!(serde_json::to_string(&Action::Update).unwrap(), "\"update\"");
        let back: Action = serde_json::from_str("\"read\"").unwrap();
        assert_eq!(back, Action::Read);
    }
}
