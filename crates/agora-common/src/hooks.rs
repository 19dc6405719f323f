//! Lifecycle hook dispatch for service operations
//!
//! Every service operation fires two named events,
//! `<domain>.<operation>.before` and `<domain>.<operation>.after`. Listeners
//! run inline on the calling thread; a before-listener vetoes the operation
//! by returning false, and after-listeners observe an immutable snapshot of
//! the affected entity.

use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashSet;

/// Receives the lifecycle events fired around each service operation
pub trait HookDispatcher: Send + Sync {
    /// Dispatch a before-event. Returning false vetoes the operation.
    fn before(&self, event: &str) -> bool;

    /// Dispatch an after-event with a snapshot of the affected entity.
    fn after(&self, event: &str, snapshot: &Value);
}

/// Dispatcher that lets every operation proceed and observes nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHooks;

impl HookDispatcher for NoopHooks {
    fn before(&self, _event: &str) -> bool {
        true
    }

    fn after(&self, _event: &str, _snapshot: &Value) {}
}

/// Dispatcher that records dispatched events and vetoes on demand
///
/// Used by the test suites to assert event ordering and veto behavior.
#[derive(Debug, Default)]
pub struct RecordingHooks {
    vetoed: RwLock<HashSet<String>>,
    before_events: RwLock<Vec<String>>,
    after_events: RwLock<Vec<(String, Value)>>,
}

impl RecordingHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Veto every future dispatch of the given before-event
    pub fn veto(&self, event: &str) {
        self.vetoed.write().insert(event.to_string());
    }

    /// Before-events seen so far, in dispatch order
    pub fn before_events(&self) -> Vec<String> {
        self.before_events.read().clone()
    }

    /// After-events seen so far, with their snapshots
    pub fn after_events(&self) -> Vec<(String, Value)> {
        self.after_events.read().clone()
    }
}

impl HookDispatcher for RecordingHooks {
    fn before(&self, event: &str) -> bool {
        self.before_events.write().push(event.to_string());
        !self.vetoed.read().contains(event)
    }

    fn after(&self, event: &str, snapshot: &Value) {
        self.after_events
            .write()
            .push((event.to_string(), snapshot.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_noop_hooks_always_proceed() {
        let hooks = NoopHooks;
        assert!(hooks.before("thread.archive.before"));
        hooks.after("thread.archive.after", &json!({"id": 1}));
    }

    #[test]
    fn test_recording_hooks_track_events() {
        let hooks = RecordingHooks::new();
        assert!(hooks.before("post.create.before"));
        hooks.after("post.create.after", &json!({"id": 3}));

        assert_eq!(hooks.before_events(), vec!["post.create.before"]);
        let after = hooks.after_events();
        assert_eq!(after.len(), 1);
        assert_eq!(after[0].0, "post.create.after");
        assert_eq!(after[0].1, json!({"id": 3}));
    }

    #[test]
    fn test_veto_blocks_only_named_event() {
        let hooks = RecordingHooks::new();
        hooks.veto("thread.remove.before");
        assert!(!hooks.before("thread.remove.before"));
        assert!(hooks.before("thread.archive.before"));
        assert_eq!(hooks.before_events().len(), 2);
    }
}
