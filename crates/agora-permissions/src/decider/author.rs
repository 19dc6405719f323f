//! Author-match policy

use std::sync::Arc;

use crate::context::{Action, Principal, Subject};
use crate::decision::Decision;
use crate::error::PermissionResult;

use super::Decider;

/// Allows only the author of the subject to update or delete it
///
/// Abstains for every other operation kind; author checks make no sense for
/// creation or reading.
#[derive(Default)]
pub struct AuthorDecider {
    action: Option<Action>,
    subject: Option<Arc<dyn Subject>>,
    member: Option<Arc<dyn Principal>>,
}

impl AuthorDecider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Decider for AuthorDecider {
    fn set_action(&mut self, action: Option<Action>) {
        self.action = action;
    }

    fn set_subject(&mut self, subject: Option<Arc<dyn Subject>>) {
        self.subject = subject;
    }

    fn set_member(&mut self, member: Option<Arc<dyn Principal>>) {
        self.member = member;
    }

    fn decide(&mut self) -> PermissionResult<Decision> {
        if !matches!(self.action, Some(Action::Update | Action::Delete)) {
            return Ok(Decision::Abstain);
        }
        let allowed = match (&self.subject, &self.member) {
            (Some(subject), Some(member)) => {
                subject.author_id() == Some(member.principal_id())
            }
            _ => false,
        };
        Ok(if allowed {
            Decision::Allow
        } else {
            Decision::Deny
        })
    }
}
