//! End-to-end flows across the permission and service layers

use std::sync::Arc;

use serde_json::json;

use agora_common::{
    CountingTransactionProvider, ForumConfig, KeyResolver, NoopHooks, Payload, RecordingHooks,
};
use agora_domain::{
    Archivable, Category, CategoryId, Forum, ForumId, GroupId, Member, MemberId, Post, PostId,
    RecordForm, Role, RoleId, Thread, ThreadId,
};
use agora_permissions::{
    Action, AuthorDecider, Decision, DeciderSet, GroupDecider, PermitChecker, RoleDecider,
};
use agora_services::{
    ForumBuilder, MemberBuilder, PostBuilder, RoleGranter, ServiceContext, ThreadArchiver,
    ThreadBuilder, ThreadRemover,
};

fn payload(entries: &[(&str, serde_json::Value)]) -> Payload {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn context(
    db: Arc<CountingTransactionProvider>,
    hooks: Arc<RecordingHooks>,
) -> ServiceContext {
    ServiceContext::new(db, hooks, Arc::new(KeyResolver), ForumConfig::default())
}

#[test]
fn test_board_lifecycle_updates_all_tallies() {
    let db = Arc::new(CountingTransactionProvider::new());
    let hooks = Arc::new(RecordingHooks::new());
    let ctx = context(db.clone(), hooks.clone());

    // Register a member.
    let mut author = Member::new(MemberId::new(7));
    let result = MemberBuilder::new(ctx.clone())
        .register(&mut author, &payload(&[("username", json!("ferris"))]));
    assert!(result.succeeded);

    // Build a category and a forum under it.
    let mut category = Category::new(CategoryId::new(1));
    category
        .save_from(&payload(&[("name", json!("General"))]))
        .unwrap();
    let mut forum = Forum::new(ForumId::new(1), category.id);
    let result = ForumBuilder::new(ctx.clone()).create(
        &mut forum,
        &category,
        &payload(&[("name", json!("Announcements"))]),
    );
    assert!(result.succeeded);

    // Open a thread and reply to it.
    let mut thread = Thread::new(ThreadId::new(1), forum.id, author.id);
    let result = ThreadBuilder::new(ctx.clone()).create(
        &mut thread,
        &author,
        &mut forum,
        &payload(&[("name", json!("Welcome"))]),
    );
    assert!(result.succeeded);
    assert_eq!(forum.threads_count, 1);

    let mut post = Post::new(PostId::new(1), thread.id, forum.id, author.id);
    let result = PostBuilder::new(ctx.clone()).create(
        &mut post,
        &mut author,
        &mut thread,
        &mut forum,
        &payload(&[("content", json!("Hello, forum!"))]),
    );
    assert!(result.succeeded);
    assert_eq!(thread.posts_count, 1);
    assert_eq!(forum.posts_count, 1);
    assert_eq!(author.posts_count, 1);

    // Archive then remove the thread; the forum tallies settle back.
    assert!(ThreadArchiver::new(ctx.clone()).archive(&mut thread).succeeded);
    let result = ThreadRemover::new(ctx.clone()).remove(&mut thread, &mut forum);
    assert!(result.succeeded);
    assert_eq!(forum.threads_count, 0);
    assert_eq!(forum.posts_count, 0);

    // Every operation committed exactly once, nothing rolled back.
    assert_eq!(db.begun(), 6);
    assert_eq!(db.committed(), 6);
    assert_eq!(db.rolled_back(), 0);

    // Lifecycle events arrived in before/after pairs, in operation order.
    let before = hooks.before_events();
    assert_eq!(
        before,
        vec![
            "member.register.before",
            "forum.create.before",
            "thread.create.before",
            "post.create.before",
            "thread.archive.before",
            "thread.remove.before",
        ]
    );
    let after: Vec<String> = hooks.after_events().into_iter().map(|(e, _)| e).collect();
    assert_eq!(
        after,
        vec![
            "member.register.after",
            "forum.create.after",
            "thread.create.after",
            "post.create.after",
            "thread.archive.after",
            "thread.remove.after",
        ]
    );
}

#[test]
fn test_author_or_moderator_may_update_thread() {
    let checker = PermitChecker::new(Arc::new(NoopHooks));
    let ctx = ServiceContext::detached();

    let mut author = Member::new(MemberId::new(7));
    author
        .save_from(&payload(&[("username", json!("author"))]))
        .unwrap();
    let mut bystander = Member::new(MemberId::new(9));
    bystander
        .save_from(&payload(&[("username", json!("bystander"))]))
        .unwrap();
    let mut moderator = Member::new(MemberId::new(11));
    moderator
        .save_from(&payload(&[("username", json!("moderator"))]))
        .unwrap();

    // Grant the moderator an update/delete role over threads.
    let mut role = Role::new(RoleId::new(1));
    role.save_from(&payload(&[
        ("name", json!("Thread moderator")),
        ("kind", json!("thread")),
        ("actions", json!(["update", "delete"])),
    ]))
    .unwrap();
    assert!(RoleGranter::new(ctx).grant(&mut moderator, &role).succeeded);

    let mut thread = Thread::new(ThreadId::new(1), ForumId::new(1), author.id);
    thread
        .save_from(&payload(&[("name", json!("Welcome"))]))
        .unwrap();
    let subject = Arc::new(thread);

    let mut decider = DeciderSet::new()
        .with(AuthorDecider::new())
        .with(RoleDecider::new())
        .into_or();

    let decision = checker.check(
        &mut decider,
        Some(Action::Update),
        Some(subject.clone()),
        Some(Arc::new(author)),
    );
    assert_eq!(decision, Decision::Allow);

    let decision = checker.check(
        &mut decider,
        Some(Action::Update),
        Some(subject.clone()),
        Some(Arc::new(moderator)),
    );
    assert_eq!(decision, Decision::Allow);

    let decision = checker.check(
        &mut decider,
        Some(Action::Update),
        Some(subject),
        Some(Arc::new(bystander)),
    );
    assert_eq!(decision, Decision::Deny);
}

#[test]
fn test_group_restricted_thread_gates_non_members() {
    let checker = PermitChecker::new(Arc::new(NoopHooks));

    let mut insider = Member::new(MemberId::new(7));
    insider
        .save_from(&payload(&[("username", json!("insider"))]))
        .unwrap();
    insider.join_group(GroupId::new(3)).unwrap();
    let mut outsider = Member::new(MemberId::new(9));
    outsider
        .save_from(&payload(&[("username", json!("outsider"))]))
        .unwrap();

    let mut thread = Thread::new(ThreadId::new(1), ForumId::new(1), MemberId::new(1));
    thread
        .save_from(&payload(&[("name", json!("Staff room"))]))
        .unwrap();
    thread.restrict_to(vec![GroupId::new(3)]);
    let subject = Arc::new(thread);

    let mut decider = GroupDecider::new();
    let decision = checker.check(
        &mut decider,
        Some(Action::Read),
        Some(subject.clone()),
        Some(Arc::new(insider)),
    );
    assert_eq!(decision, Decision::Allow);

    let decision = checker.check(
        &mut decider,
        Some(Action::Read),
        Some(subject),
        Some(Arc::new(outsider)),
    );
    assert_eq!(decision, Decision::Deny);
}

#[test]
fn test_failed_operation_rolls_back_and_leaves_tallies_untouched() {
    let db = Arc::new(CountingTransactionProvider::new());
    let hooks = Arc::new(RecordingHooks::new());
    let ctx = context(db.clone(), hooks);

    let mut author = Member::new(MemberId::new(7));
    author
        .save_from(&payload(&[("username", json!("ferris"))]))
        .unwrap();
    let mut forum = Forum::new(ForumId::new(1), CategoryId::new(1));
    forum
        .save_from(&payload(&[("name", json!("General"))]))
        .unwrap();
    let mut thread = Thread::new(ThreadId::new(1), forum.id, author.id);
    thread
        .save_from(&payload(&[("name", json!("Welcome"))]))
        .unwrap();
    thread.archive().unwrap();

    // Posting into an archived thread fails its precondition.
    let mut post = Post::new(PostId::new(1), thread.id, forum.id, author.id);
    let result = PostBuilder::new(ctx).create(
        &mut post,
        &mut author,
        &mut thread,
        &mut forum,
        &payload(&[("content", json!("Too late"))]),
    );

    assert!(!result.succeeded);
    assert_eq!(result.errors["api"], json!("thread.archived"));
    assert_eq!(db.begun(), 1);
    assert_eq!(db.committed(), 0);
    assert_eq!(db.rolled_back(), 1);
    assert_eq!(thread.posts_count, 0);
    assert_eq!(forum.posts_count, 0);
    assert_eq!(author.posts_count, 0);
}
