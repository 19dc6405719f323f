//! Value objects representing immutable domain identity

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            pub fn new(raw: u64) -> Self {
                Self(raw)
            }

            pub fn get(&self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Category identifier
    CategoryId
);
define_id!(
    /// Forum identifier
    ForumId
);
define_id!(
    /// Thread identifier
    ThreadId
);
define_id!(
    /// Post identifier
    PostId
);
define_id!(
    /// Member identifier
    MemberId
);
define_id!(
    /// Group identifier
    GroupId
);
define_id!(
    /// Role identifier
    RoleId
);
define_id!(
    /// Rank identifier
    RankId
);
define_id!(
    /// Private message identifier
    MessageId
);
define_id!(
    /// Poll identifier
    PollId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_round_trip() {
        let id = ThreadId::new(42);
        assert_eq!(id.get(), 42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(ThreadId::from(42), id);
    }

    #[test]
    fn test_id_serializes_transparently() {
        let id = MemberId::new(7);
        assert_eq!(serde_json::to_string(&id).unwrap(), "7");
        let back: MemberId = serde_json::from_str("7").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_ids_order_by_value() {
        assert!(PostId::new(1) < PostId::new(2));
    }
}
