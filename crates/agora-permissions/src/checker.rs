//! Single-decision orchestration

use std::sync::Arc;

use agora_common::HookDispatcher;
use serde_json::Value;
use tracing::error;

use crate::context::{Action, Principal, Subject};
use crate::decider::Decider;
use crate::decision::Decision;

/// Event fired before each check; a veto collapses the check to Deny
pub const CHECK_BEFORE: &str = "permit.check.before";

/// Event fired after each successfully completed check
pub const CHECK_AFTER: &str = "permit.check.after";

/// Runs one decider inside a before/after hook envelope
///
/// Deciders are never allowed to fail past the checker: any error is logged
/// and collapsed to Deny. Abstain passes through unchanged; only combinators
/// normalize their own children's abstentions.
pub struct PermitChecker {
    hooks: Arc<dyn HookDispatcher>,
}

impl PermitChecker {
    pub fn new(hooks: Arc<dyn HookDispatcher>) -> Self {
        Self { hooks }
    }

    /// Configure the decider with `(action, subject, member)` and vote
    ///
    /// A vetoed check returns Deny without the decider ever being
    /// configured or invoked.
    pub fn check(
        &self,
        decider: &mut dyn Decider,
        action: Option<Action>,
        subject: Option<Arc<dyn Subject>>,
        member: Option<Arc<dyn Principal>>,
    ) -> Decision {
        if !self.hooks.before(CHECK_BEFORE) {
            return Decision::Deny;
        }

        decider.set_action(action);
        decider.set_subject(subject);
        decider.set_member(member);

        match decider.decide() {
            Ok(decision) => {
                self.hooks.after(CHECK_AFTER, &Value::Null);
                decision
            }
            Err(err) => {
                error!(target: "agora::permit", error = %err, "decider failed during check");
                Decision::Deny
            }
        }
    }
}
