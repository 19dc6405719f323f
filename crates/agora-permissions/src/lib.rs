//! Permission decisions for the Agora forum engine
//!
//! A [`Decider`] is a policy unit that votes Allow/Deny/Abstain on a single
//! authorization question. Leaf deciders check author identity, group
//! membership, or role membership; the [`AndDecider`]/[`OrDecider`]
//! combinators aggregate an ordered list of children with short-circuit
//! evaluation. [`PermitChecker`] runs one decider inside a before/after hook
//! envelope and collapses vetoes and failures to Deny.

pub mod checker;
pub mod context;
pub mod decider;
pub mod decision;
pub mod error;

pub use checker::PermitChecker;
pub use context::{Action, Principal, Subject};
pub use decider::{
    AndDecider, AuthorDecider, Decider, DeciderSet, GroupDecider, OrDecider, RoleDecider,
};
pub use decision::Decision;
pub use error::{PermissionError, PermissionResult};
