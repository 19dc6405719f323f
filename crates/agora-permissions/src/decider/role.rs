//! Role-membership policy

use std::sync::Arc;

use crate::context::{Action, Principal, Subject};
use crate::decision::Decision;
use crate::error::PermissionResult;

use super::Decider;

/// Delegates to the member's own role-membership query for `(subject, action)`
#[derive(Default)]
pub struct RoleDecider {
    action: Option<Action>,
    subject: Option<Arc<dyn Subject>>,
    member: Option<Arc<dyn Principal>>,
}

impl RoleDecider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Decider for RoleDecider {
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
        let Some(member) = &self.member else {
            return Ok(Decision::Deny);
        };
        Ok(if member.has_role(self.subject.as_deref(), self.action) {
            Decision::Allow
        } else {
            Decision::Deny
        })
    }
}
