//! Integration tests for the service envelope
//!
//! Exercises real services against counting transaction providers and
//! recording hook dispatchers to verify the envelope's accounting: a veto
//! opens no transaction, a failure rolls back exactly once, and a success
//! commits exactly once.

use std::sync::Arc;

use serde_json::json;

use agora_common::{
    CountingTransactionProvider, ForumConfig, KeyResolver, Payload, RecordingHooks, TableResolver,
};
use agora_domain::{Archivable, ForumId, MemberId, RecordForm, Thread, ThreadId};
use agora_services::{ServiceContext, ThreadArchiver};

fn thread() -> Thread {
    let mut thread = Thread::new(ThreadId::new(1), ForumId::new(1), MemberId::new(7));
    let data: Payload = [("name".to_string(), json!("Welcome"))].into_iter().collect();
    thread.save_from(&data).unwrap();
    thread
}

fn context(
    db: Arc<CountingTransactionProvider>,
    hooks: Arc<RecordingHooks>,
) -> ServiceContext {
    ServiceContext::new(db, hooks, Arc::new(KeyResolver), ForumConfig::default())
}

#[test]
fn test_success_commits_once_and_fires_after_hook() {
    let db = Arc::new(CountingTransactionProvider::new());
    let hooks = Arc::new(RecordingHooks::new());
    let archiver = ThreadArchiver::new(context(db.clone(), hooks.clone()));
    let mut thread = thread();

    let result = archiver.archive(&mut thread);

    assert!(result.succeeded);
    assert!(thread.is_archived());
    assert_eq!(db.begun(), 1);
    assert_eq!(db.committed(), 1);
    assert_eq!(db.rolled_back(), 0);

    assert_eq!(hooks.before_events(), vec!["thread.archive.before".to_string()]);
    let after = hooks.after_events();
    assert_eq!(after.len(), 1);
    assert_eq!(after[0].0, "thread.archive.after");
    // The after-hook snapshot reflects the mutated entity.
    assert_eq!(after[0].1["archived"], json!(true));
    assert_eq!(after[0].1["name"], json!("Welcome"));
}

#[test]
fn test_veto_opens_no_transaction() {
    let db = Arc::new(CountingTransactionProvider::new());
    let hooks = Arc::new(RecordingHooks::new());
    hooks.veto("thread.archive.before");
    let archiver = ThreadArchiver::new(context(db.clone(), hooks.clone()));
    let mut thread = thread();

    let result = archiver.archive(&mut thread);

    assert!(!result.succeeded);
    assert!(result.errors.is_empty());
    assert!(!thread.is_archived());
    assert_eq!(db.begun(), 0);
    assert_eq!(db.committed(), 0);
    assert_eq!(db.rolled_back(), 0);
    assert!(hooks.after_events().is_empty());
}

#[test]
fn test_precondition_failure_rolls_back_exactly_once() {
    let db = Arc::new(CountingTransactionProvider::new());
    let hooks = Arc::new(RecordingHooks::new());
    let archiver = ThreadArchiver::new(context(db.clone(), hooks.clone()));
    let mut thread = thread();
    thread.archive().unwrap();

    let result = archiver.archive(&mut thread);

    assert!(!result.succeeded);
    assert_eq!(result.errors["api"], json!("thread.already.archived"));
    assert_eq!(db.begun(), 1);
    assert_eq!(db.committed(), 0);
    assert_eq!(db.rolled_back(), 1);
    assert!(hooks.after_events().is_empty());
}

#[test]
fn test_precondition_key_resolves_through_injected_resolver() {
    let db = Arc::new(CountingTransactionProvider::new());
    let hooks = Arc::new(RecordingHooks::new());
    let mut resolver = TableResolver::new();
    resolver.insert("thread.already.archived", "This thread is already archived.");
    let archiver = ThreadArchiver::new(ServiceContext::new(
        db,
        hooks,
        Arc::new(resolver),
        ForumConfig::default(),
    ));
    let mut thread = thread();
    thread.archive().unwrap();

    let result = archiver.archive(&mut thread);
    assert_eq!(
        result.errors["api"],
        json!("This thread is already archived.")
    );
}

#[test]
fn test_revive_mirrors_archive_preconditions() {
    let db = Arc::new(CountingTransactionProvider::new());
    let hooks = Arc::new(RecordingHooks::new());
    let archiver = ThreadArchiver::new(context(db.clone(), hooks));
    let mut thread = thread();

    let result = archiver.revive(&mut thread);
    assert_eq!(result.errors["api"], json!("thread.not.archived"));
    assert_eq!(db.rolled_back(), 1);

    thread.archive().unwrap();
    assert!(archiver.revive(&mut thread).succeeded);
    assert_eq!(db.committed(), 1);
}
