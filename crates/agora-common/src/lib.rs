//! Shared seams for the Agora service layer
//!
//! Everything a service operation needs from the outside world crosses one
//! of the narrow interfaces defined here: the transaction provider, the
//! lifecycle hook dispatcher, the message resolver, and the configuration
//! limits. The uniform [`OpResult`] is the only value handed back out.

pub mod config;
pub mod hooks;
pub mod messages;
pub mod result;
pub mod transaction;

pub use config::{ConfigError, ForumConfig};
pub use hooks::{HookDispatcher, NoopHooks, RecordingHooks};
pub use messages::{KeyResolver, MessageResolver, TableResolver};
pub use result::{ErrorMap, OpResult, Payload};
pub use transaction::{
    CountingTransactionProvider, NoopTransactionProvider, Transaction, TransactionError,
    TransactionProvider, TransactionResult,
};
