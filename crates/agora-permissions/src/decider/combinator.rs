//! And/Or aggregation over child deciders
//!
//! Combinators hold an ordered, pre-resolved child list and propagate their
//! own context to each child immediately before invoking it. Evaluation
//! order is significant: the first decisive vote wins, and children after
//! the short-circuit point are never invoked.

use std::sync::Arc;

use crate::context::{Action, Principal, Subject};
use crate::decision::Decision;
use crate::error::PermissionResult;

use super::Decider;

/// Denies if any child denies; otherwise allows
///
/// Abstain never propagates out of a combinator: all-abstaining children
/// still yield Allow.
pub struct AndDecider {
    children: Vec<Box<dyn Decider>>,
    action: Option<Action>,
    subject: Option<Arc<dyn Subject>>,
    member: Option<Arc<dyn Principal>>,
}

impl AndDecider {
    pub fn new(children: Vec<Box<dyn Decider>>) -> Self {
        Self {
            children,
            action: None,
            subject: None,
            member: None,
        }
    }
}

impl Decider for AndDecider {
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
        for child in self.children.iter_mut() {
            child.set_action(self.action);
            child.set_subject(self.subject.clone());
            child.set_member(self.member.clone());
            if child.decide()? == Decision::Deny {
                return Ok(Decision::Deny);
            }
        }
        Ok(Decision::Allow)
    }
}

/// Allows if any child allows; otherwise denies
///
/// Mirrors [`AndDecider`]: all-abstaining children yield Deny.
pub struct OrDecider {
    children: Vec<Box<dyn Decider>>,
    action: Option<Action>,
    subject: Option<Arc<dyn Subject>>,
    member: Option<Arc<dyn Principal>>,
}

impl OrDecider {
    pub fn new(children: Vec<Box<dyn Decider>>) -> Self {
        Self {
            children,
            action: None,
            subject: None,
            member: None,
        }
    }
}

impl Decider for OrDecider {
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
        for child in self.children.iter_mut() {
            child.set_action(self.action);
            child.set_subject(self.subject.clone());
            child.set_member(self.member.clone());
            if child.decide()? == Decision::Allow {
                return Ok(Decision::Allow);
            }
        }
        Ok(Decision::Deny)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decider::testing::{FailingDecider, ScriptedDecider, StubPrincipal, StubSubject};

    fn scripted(decisions: &[Decision]) -> Vec<Box<dyn Decider>> {
        decisions
            .iter()
            .map(|d| Box::new(ScriptedDecider::new(*d)) as Box<dyn Decider>)
            .collect()
    }

    #[test]
    fn test_and_denies_on_first_deny() {
        let mut decider = AndDecider::new(scripted(&[
            Decision::Allow,
            Decision::Deny,
            Decision::Allow,
        ]));
        assert_eq!(decider.decide().unwrap(), Decision::Deny);
    }

    #[test]
    fn test_and_short_circuits_after_deny() {
        // A failing child after the deny would surface as an error if it ran.
        let children: Vec<Box<dyn Decider>> = vec![
            Box::new(ScriptedDecider::new(Decision::Deny)),
            Box::new(FailingDecider),
        ];
        let mut decider = AndDecider::new(children);
        assert_eq!(decider.decide().unwrap(), Decision::Deny);
    }

    #[test]
    fn test_and_collapses_abstain_to_allow() {
        let mut decider = AndDecider::new(scripted(&[Decision::Abstain, Decision::Abstain]));
        assert_eq!(decider.decide().unwrap(), Decision::Allow);

        let mut mixed = AndDecider::new(scripted(&[Decision::Abstain, Decision::Allow]));
        assert_eq!(mixed.decide().unwrap(), Decision::Allow);
    }

    #[test]
    fn test_and_with_no_children_allows() {
        let mut decider = AndDecider::new(Vec::new());
        assert_eq!(decider.decide().unwrap(), Decision::Allow);
    }

    #[test]
    fn test_or_allows_on_first_allow() {
        let children: Vec<Box<dyn Decider>> = vec![
            Box::new(ScriptedDecider::new(Decision::Allow)),
            Box::new(FailingDecider),
        ];
        let mut decider = OrDecider::new(children);
        assert_eq!(decider.decide().unwrap(), Decision::Allow);
    }

    #[test]
    fn test_or_collapses_abstain_to_deny() {
        let mut decider = OrDecider::new(scripted(&[Decision::Abstain, Decision::Abstain]));
        assert_eq!(decider.decide().unwrap(), Decision::Deny);

        let mut mixed = OrDecider::new(scripted(&[Decision::Deny, Decision::Abstain]));
        assert_eq!(mixed.decide().unwrap(), Decision::Deny);
    }

    #[test]
    fn test_child_errors_propagate() {
        let children: Vec<Box<dyn Decider>> = vec![Box::new(FailingDecider)];
        let mut decider = AndDecider::new(children);
        assert!(decider.decide().is_err());
    }

    #[test]
    fn test_context_propagates_to_children() {
        // An AuthorDecider child only allows when the combinator's context
        // actually reaches it.
        let children: Vec<Box<dyn Decider>> =
            vec![Box::new(crate::decider::AuthorDecider::new())];
        let mut decider = OrDecider::new(children);
        decider.set_action(Some(Action::Update));
        decider.set_subject(Some(Arc::new(StubSubject {
            author: Some(7),
            groups: Vec::new(),
        })));
        decider.set_member(Some(Arc::new(StubPrincipal {
            id: 7,
            groups: Vec::new(),
            roles: false,
        })));
        assert_eq!(decider.decide().unwrap(), Decision::Allow);
    }
}
