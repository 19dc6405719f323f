//! Workspace-level integration harness for Agora
//!
//! The crates under `crates/` are the real library surface; this package
//! exists to host the cross-crate suites in `tests/`.
