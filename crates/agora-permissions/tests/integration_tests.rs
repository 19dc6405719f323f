//! Integration tests for the decision subsystem

use std::sync::Arc;

use agora_common::{NoopHooks, RecordingHooks};
use agora_permissions::{
    checker::{CHECK_AFTER, CHECK_BEFORE},
    Action, AuthorDecider, Decision, DeciderSet, GroupDecider, PermitChecker, Principal,
    RoleDecider, Subject,
};

struct TestSubject {
    author: Option<u64>,
    groups: Vec<u64>,
}

impl Subject for TestSubject {
    fn kind(&self) -> &'static str {
        "thread"
    }

    fn author_id(&self) -> Option<u64> {
        self.author
    }

    fn allowed_group_ids(&self) -> Vec<u64> {
        self.groups.clone()
    }
}

struct TestMember {
    id: u64,
    groups: Vec<u64>,
    moderator: bool,
}

impl Principal for TestMember {
    fn principal_id(&self) -> u64 {
        self.id
    }

    fn in_group(&self, group_id: u64) -> bool {
        self.groups.contains(&group_id)
    }

    fn has_role(&self, subject: Option<&dyn Subject>, _action: Option<Action>) -> bool {
        self.moderator && subject.map(|s| s.kind() == "thread").unwrap_or(false)
    }
}

fn subject(author: Option<u64>, groups: Vec<u64>) -> Arc<dyn Subject> {
    Arc::new(TestSubject { author, groups })
}

fn member(id: u64, groups: Vec<u64>) -> Arc<dyn Principal> {
    Arc::new(TestMember {
        id,
        groups,
        moderator: false,
    })
}

#[test]
fn test_author_scenario_matching_and_mismatched_ids() {
    let checker = PermitChecker::new(Arc::new(NoopHooks));

    let mut decider = AuthorDecider::new();
    let decision = checker.check(
        &mut decider,
        Some(Action::Update),
        Some(subject(Some(7), Vec::new())),
        Some(member(7, Vec::new())),
    );
    assert_eq!(decision, Decision::Allow);

    let decision = checker.check(
        &mut decider,
        Some(Action::Update),
        Some(subject(Some(7), Vec::new())),
        Some(member(9, Vec::new())),
    );
    assert_eq!(decision, Decision::Deny);
}

#[test]
fn test_and_scenario_author_deny_wins_over_group_allow() {
    // Author mismatch denies; the group child would allow but never needs
    // to run.
    let mut decider = DeciderSet::new()
        .with(AuthorDecider::new())
        .with(GroupDecider::new())
        .into_and();

    let checker = PermitChecker::new(Arc::new(NoopHooks));
    let decision = checker.check(
        &mut decider,
        Some(Action::Delete),
        Some(subject(Some(7), vec![3])),
        Some(member(9, vec![3])),
    );
    assert_eq!(decision, Decision::Deny);
}

#[test]
fn test_or_grants_moderators_what_authors_get() {
    // Either the author or a thread moderator may update.
    let mut decider = DeciderSet::new()
        .with(AuthorDecider::new())
        .with(RoleDecider::new())
        .into_or();

    let checker = PermitChecker::new(Arc::new(NoopHooks));

    let moderator = Arc::new(TestMember {
        id: 40,
        groups: Vec::new(),
        moderator: true,
    });
    let decision = checker.check(
        &mut decider,
        Some(Action::Update),
        Some(subject(Some(7), Vec::new())),
        Some(moderator),
    );
    assert_eq!(decision, Decision::Allow);

    let bystander = member(40, Vec::new());
    let decision = checker.check(
        &mut decider,
        Some(Action::Update),
        Some(subject(Some(7), Vec::new())),
        Some(bystander),
    );
    assert_eq!(decision, Decision::Deny);
}

#[test]
fn test_group_decider_case_table() {
    let checker = PermitChecker::new(Arc::new(NoopHooks));
    let mut decider = GroupDecider::new();

    // Subject absent.
    assert_eq!(
        checker.check(&mut decider, None, None, Some(member(1, vec![3]))),
        Decision::Deny
    );
    // No restriction configured.
    assert_eq!(
        checker.check(
            &mut decider,
            None,
            Some(subject(None, Vec::new())),
            Some(member(1, vec![3]))
        ),
        Decision::Abstain
    );
    // Restriction exists but no principal to check.
    assert_eq!(
        checker.check(&mut decider, None, Some(subject(None, vec![3])), None),
        Decision::Deny
    );
    // Membership overlap.
    assert_eq!(
        checker.check(
            &mut decider,
            None,
            Some(subject(None, vec![3])),
            Some(member(1, vec![3, 5]))
        ),
        Decision::Allow
    );
}

#[test]
fn test_checker_veto_bypasses_decider_and_after_hook() {
    let hooks = Arc::new(RecordingHooks::new());
    hooks.veto(CHECK_BEFORE);
    let checker = PermitChecker::new(hooks.clone());

    let mut decider = AuthorDecider::new();
    let decision = checker.check(
        &mut decider,
        Some(Action::Update),
        Some(subject(Some(7), Vec::new())),
        Some(member(7, Vec::new())),
    );

    assert_eq!(decision, Decision::Deny);
    assert_eq!(hooks.before_events(), vec![CHECK_BEFORE.to_string()]);
    assert!(hooks.after_events().is_empty());
}

#[test]
fn test_checker_fires_after_hook_on_success() {
    let hooks = Arc::new(RecordingHooks::new());
    let checker = PermitChecker::new(hooks.clone());

    let mut decider = AuthorDecider::new();
    checker.check(&mut decider, Some(Action::Read), None, None);

    let after = hooks.after_events();
    assert_eq!(after.len(), 1);
    assert_eq!(after[0].0, CHECK_AFTER);
}
