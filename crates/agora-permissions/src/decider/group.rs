//! Group-membership policy

use std::sync::Arc;

use crate::context::{Action, Principal, Subject};
use crate::decision::Decision;
use crate::error::PermissionResult;

use super::Decider;

/// Checks the acting member against the subject's allowed-groups restriction
///
/// An empty allowed-group set means no restriction is configured, so the
/// decider abstains. With a restriction in place, a missing member is a
/// denial: there is nobody to check.
#[derive(Default)]
pub struct GroupDecider {
    subject: Option<Arc<dyn Subject>>,
    member: Option<Arc<dyn Principal>>,
}

impl GroupDecider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Decider for GroupDecider {
    fn set_action(&mut self, _action: Option<Action>) {}

    fn set_subject(&mut self, subject: Option<Arc<dyn Subject>>) {
        self.subject = subject;
    }

    fn set_member(&mut self, member: Option<Arc<dyn Principal>>) {
        self.member = member;
    }

    fn decide(&mut self) -> PermissionResult<Decision> {
        let Some(subject) = &self.subject else {
            return Ok(Decision::Deny);
        };
        let groups = subject.allowed_group_ids();
        if groups.is_empty() {
            return Ok(Decision::Abstain);
        }
        let Some(member) = &self.member else {
            return Ok(Decision::Deny);
        };
        Ok(if groups.iter().any(|group| member.in_group(*group)) {
            Decision::Allow
        } else {
            Decision::Deny
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decider::testing::{StubPrincipal, StubSubject};

    fn subject(groups: Vec<u64>) -> Arc<dyn Subject> {
        Arc::new(StubSubject {
            author: None,
            groups,
        })
    }

    fn member(groups: Vec<u64>) -> Arc<dyn Principal> {
        Arc::new(StubPrincipal {
            id: 1,
            groups,
            roles: false,
        })
    }

    #[test]
    fn test_denies_absent_subject() {
        let mut decider = GroupDecider::new();
        decider.set_member(Some(member(vec![1])));
        assert_eq!(decider.decide().unwrap(), Decision::Deny);
    }

    #[test]
    fn test_abstains_without_restriction() {
        let mut decider = GroupDecider::new();
        decider.set_subject(Some(subject(Vec::new())));
        decider.set_member(Some(member(vec![1])));
        assert_eq!(decider.decide().unwrap(), Decision::Abstain);

        // Restriction presence is what matters, not the member.
        decider.set_member(None);
        assert_eq!(decider.decide().unwrap(), Decision::Abstain);
    }

    #[test]
    fn test_denies_absent_member_under_restriction() {
        let mut decider = GroupDecider::new();
        decider.set_subject(Some(subject(vec![3])));
        decider.set_member(None);
        assert_eq!(decider.decide().unwrap(), Decision::Deny);
    }

    #[test]
    fn test_allows_overlapping_membership() {
        let mut decider = GroupDecider::new();
        decider.set_subject(Some(subject(vec![3, 4])));
        decider.set_member(Some(member(vec![4, 9])));
        assert_eq!(decider.decide().unwrap(), Decision::Allow);
    }

    #[test]
    fn test_denies_disjoint_membership() {
        let mut decider = GroupDecider::new();
        decider.set_subject(Some(subject(vec![3, 4])));
        decider.set_member(Some(member(vec![9])));
        assert_eq!(decider.decide().unwrap(), Decision::Deny);
    }
}
