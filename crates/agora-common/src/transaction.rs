//! Transaction provider seam
//!
//! The persistence layer supplies begin/commit/rollback; the service layer
//! guarantees that exactly one of commit or rollback runs per opened
//! transaction. Commit and rollback consume the transaction, so the type
//! system rules out double settlement.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use thiserror::Error;

/// Errors surfaced by transaction providers
#[derive(Error, Debug)]
pub enum TransactionError {
    #[error("failed to begin transaction: {0}")]
    Begin(String),

    #[error("failed to commit transaction: {0}")]
    Commit(String),

    #[error("failed to roll back transaction: {0}")]
    Rollback(String),
}

/// Result type for transaction operations
pub type TransactionResult<T> = std::result::Result<T, TransactionError>;

/// A single ambient transaction scoped to one service operation
pub trait Transaction {
    /// Make all writes performed inside the transaction durable
    fn commit(self: Box<Self>) -> TransactionResult<()>;

    /// Discard all writes performed inside the transaction
    fn rollback(self: Box<Self>) -> TransactionResult<()>;
}

/// Supplies transactions to service operations
pub trait TransactionProvider: Send + Sync {
    fn begin(&self) -> TransactionResult<Box<dyn Transaction>>;
}

/// Provider for stores with single-statement atomicity; every transaction
/// settles successfully without touching anything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTransactionProvider;

struct NoopTransaction;

impl Transaction for NoopTransaction {
    fn commit(self: Box<Self>) -> TransactionResult<()> {
        Ok(())
    }

    fn rollback(self: Box<Self>) -> TransactionResult<()> {
        Ok(())
    }
}

impl TransactionProvider for NoopTransactionProvider {
    fn begin(&self) -> TransactionResult<Box<dyn Transaction>> {
        Ok(Box::new(NoopTransaction))
    }
}

/// Provider that counts begin/commit/rollback calls
///
/// The service integration suites use it to assert the envelope's
/// commit-once/rollback-once discipline.
#[derive(Debug, Default)]
pub struct CountingTransactionProvider {
    counts: Arc<Counts>,
}

#[derive(Debug, Default)]
struct Counts {
    begun: AtomicUsize,
    committed: AtomicUsize,
    rolled_back: AtomicUsize,
}

struct CountingTransaction {
    counts: Arc<Counts>,
}

impl CountingTransactionProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begun(&self) -> usize {
        self.counts.begun.load(Ordering::SeqCst)
    }

    pub fn committed(&self) -> usize {
        self.counts.committed.load(Ordering::SeqCst)
    }

    pub fn rolled_back(&self) -> usize {
        self.counts.rolled_back.load(Ordering::SeqCst)
    }
}

impl TransactionProvider for CountingTransactionProvider {
    fn begin(&self) -> TransactionResult<Box<dyn Transaction>> {
        self.counts.begun.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(CountingTransaction {
            counts: Arc::clone(&self.counts),
        }))
    }
}

impl Transaction for CountingTransaction {
    fn commit(self: Box<Self>) -> TransactionResult<()> {
        self.counts.committed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn rollback(self: Box<Self>) -> TransactionResult<()> {
        self.counts.rolled_back.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
