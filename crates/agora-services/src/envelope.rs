//! The transactional operation envelope shared by every service
//!
//! One call order throughout: before-hook, begin transaction, operation
//! body, commit or rollback, after-hook. Exactly one of commit/rollback
//! runs per opened transaction, a vetoed operation never opens one, and no
//! failure escapes as an error.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{error, warn};

use agora_common::{
    ErrorMap, ForumConfig, HookDispatcher, KeyResolver, MessageResolver, NoopHooks,
    NoopTransactionProvider, OpResult, TransactionProvider,
};
use agora_domain::Reportable;

use crate::error::{ServiceError, ServiceResult};

/// Identifies one service operation for hook events and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Op {
    domain: &'static str,
    name: &'static str,
}

impl Op {
    pub const fn new(domain: &'static str, name: &'static str) -> Self {
        Self { domain, name }
    }

    /// Event name dispatched before the operation runs
    pub fn before_event(&self) -> String {
        format!("{}.{}.before", self.domain, self.name)
    }

    /// Event name dispatched after the operation succeeds
    pub fn after_event(&self) -> String {
        format!("{}.{}.after", self.domain, self.name)
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.domain, self.name)
    }
}

/// What a completed operation body hands back to the envelope
pub(crate) struct Committed {
    pub data: ErrorMap,
    pub snapshot: Value,
}

impl Committed {
    /// Snapshot the mutated entity with no extra result data
    pub fn of<E: Serialize + ?Sized>(entity: &E) -> ServiceResult<Self> {
        Ok(Self {
            data: ErrorMap::new(),
            snapshot: snapshot(entity)?,
        })
    }

    /// Snapshot the mutated entity and attach result data
    pub fn with_data<E: Serialize + ?Sized>(entity: &E, data: ErrorMap) -> ServiceResult<Self> {
        Ok(Self {
            data,
            snapshot: snapshot(entity)?,
        })
    }
}

fn snapshot<E: Serialize + ?Sized>(entity: &E) -> ServiceResult<Value> {
    serde_json::to_value(entity).map_err(|err| {
        ServiceError::Infrastructure(format!("snapshot serialization failed: {err}"))
    })
}

/// Dependencies shared by every service operation
///
/// All collaborators are injected here; services hold nothing else.
#[derive(Clone)]
pub struct ServiceContext {
    pub db: Arc<dyn TransactionProvider>,
    pub hooks: Arc<dyn HookDispatcher>,
    pub messages: Arc<dyn MessageResolver>,
    pub config: ForumConfig,
}

impl ServiceContext {
    pub fn new(
        db: Arc<dyn TransactionProvider>,
        hooks: Arc<dyn HookDispatcher>,
        messages: Arc<dyn MessageResolver>,
        config: ForumConfig,
    ) -> Self {
        Self {
            db,
            hooks,
            messages,
            config,
        }
    }

    /// Context wired to no-op collaborators and default limits
    pub fn detached() -> Self {
        Self {
            db: Arc::new(NoopTransactionProvider),
            hooks: Arc::new(NoopHooks),
            messages: Arc::new(KeyResolver),
            config: ForumConfig::default(),
        }
    }

    /// Run one operation through the envelope
    pub(crate) fn run<F>(&self, op: Op, body: F) -> OpResult
    where
        F: FnOnce() -> ServiceResult<Committed>,
    {
        if !self.hooks.before(&op.before_event()) {
            return OpResult::rejected();
        }

        let tx = match self.db.begin() {
            Ok(tx) => tx,
            Err(err) => {
                error!(target: "agora::services", op = %op, error = %err, "failed to begin transaction");
                return OpResult::error_entry("exception", Value::String(err.to_string()));
            }
        };

        match body() {
            Ok(committed) => {
                if let Err(err) = tx.commit() {
                    error!(target: "agora::services", op = %op, error = %err, "failed to commit transaction");
                    return OpResult::error_entry("exception", Value::String(err.to_string()));
                }
                self.hooks.after(&op.after_event(), &committed.snapshot);
                if committed.data.is_empty() {
                    OpResult::success()
                } else {
                    OpResult::success_with(committed.data)
                }
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback() {
                    warn!(target: "agora::services", op = %op, error = %rollback_err, "rollback failed");
                }
                self.absorb(op, err)
            }
        }
    }

    fn absorb(&self, op: Op, err: ServiceError) -> OpResult {
        match err {
            ServiceError::Precondition { key } => {
                OpResult::error_entry("api", Value::String(self.messages.resolve(&key)))
            }
            ServiceError::Validation(errors) => OpResult::error(errors),
            ServiceError::Infrastructure(message) => {
                error!(target: "agora::services", op = %op, error = %message, "operation failed");
                OpResult::error_entry("exception", Value::String(message))
            }
            ServiceError::Domain(domain_err) => {
                error!(target: "agora::services", op = %op, error = %domain_err, "unexpected domain failure");
                OpResult::error_entry("exception", Value::String(domain_err.to_string()))
            }
        }
    }
}

/// Precondition guard: a false condition fails with the given message key
pub(crate) fn guard(condition: bool, key: &str) -> ServiceResult<()> {
    if condition {
        Ok(())
    } else {
        Err(ServiceError::Precondition {
            key: key.to_string(),
        })
    }
}

/// Map a primary-mutation outcome into the error taxonomy
pub(crate) fn saved<E: Reportable + ?Sized>(outcome: bool, entity: &E) -> ServiceResult<()> {
    if outcome {
        Ok(())
    } else {
        Err(ServiceError::Validation(entity.errors()))
    }
}

/// Map a secondary-effect outcome into the error taxonomy
pub(crate) fn applied(outcome: bool, what: &str) -> ServiceResult<()> {
    if outcome {
        Ok(())
    } else {
        Err(ServiceError::Infrastructure(format!("{what} update failed")))
    }
}
