//! # Adapters Module
//!
//! Implementations of the outbound ports.
//!
//! ## Modules
//!
//! - `storage`: in-memory and file-backed key-value stores
//! - `infra`: manual clock and sequential ids for tests and replays

pub mod infra;
pub mod storage;

pub use infra::{ManualTimeSource, SequentialIdGenerator};
pub use storage::{FileBackedKVStore, InMemoryKVStore};
