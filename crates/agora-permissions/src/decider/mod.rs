//! Policy units voting on authorization questions
//!
//! Context is request-scoped: the checker or a parent combinator sets
//! `(action, subject, member)` immediately before each `decide()` call, and
//! the decider is otherwise stateless across calls.

mod author;
mod combinator;
mod group;
mod role;
mod set;

pub use author::AuthorDecider;
pub use combinator::{AndDecider, OrDecider};
pub use group::GroupDecider;
pub use role::RoleDecider;
pub use set::DeciderSet;

use std::sync::Arc;

use crate::context::{Action, Principal, Subject};
use crate::decision::Decision;
use crate::error::PermissionResult;

/// A policy unit that votes Allow/Deny/Abstain on one authorization question
pub trait Decider: Send + Sync {
    /// Set the operation kind for the next `decide()` call
    fn set_action(&mut self, action: Option<Action>);

    /// Set the entity under authorization for the next `decide()` call
    fn set_subject(&mut self, subject: Option<Arc<dyn Subject>>);

    /// Set the acting principal for the next `decide()` call
    fn set_member(&mut self, member: Option<Arc<dyn Principal>>);

    /// Vote on the most recently set context
    fn decide(&mut self) -> PermissionResult<Decision>;
}
