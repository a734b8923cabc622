//! # Outbound Ports (Driven Ports)
//!
//! Dependencies the marketplace service requires from its host.

use crate::domain::{KVStoreError, Timestamp};

/// Abstract interface for the key-value store holding the collections.
///
/// Production: `FileBackedKVStore`
/// Testing: `InMemoryKVStore`
pub trait KeyValueStore: Send + Sync {
    /// Get a value by key.
    fn get(&self, key: &str) -> Result<Option<String>, KVStoreError>;

    /// Put a single key-value pair.
    fn put(&mut self, key: &str, value: &str) -> Result<(), KVStoreError>;

    /// Delete a key.
    fn delete(&mut self, key: &str) -> Result<(), KVStoreError>;

    /// Execute an atomic batch write.
    ///
    /// Either ALL operations in the batch are applied, or NONE are.
    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError>;

    /// Check if a key exists.
    fn exists(&self, key: &str) -> Result<bool, KVStoreError>;
}

/// Batch operation for atomic writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOperation {
    /// Put a key-value pair.
    Put { key: String, value: String },
    /// Delete a key.
    Delete { key: String },
}

impl BatchOperation {
    /// Create a Put operation.
    pub fn put(key: impl Into<String>, value: impl Into<String>) -> Self {
        BatchOperation::Put {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create a Delete operation.
    pub fn delete(key: impl Into<String>) -> Self {
        BatchOperation::Delete { key: key.into() }
    }
}

/// Time source for consistent timestamp handling.
///
/// Abstracted to allow testing with deterministic time.
pub trait TimeSource: Send + Sync {
    /// Returns the current wall-clock instant.
    fn now(&self) -> Timestamp;
}

/// Default system time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        chrono::Utc::now()
    }
}

/// Record identifier generator.
pub trait IdGenerator: Send + Sync {
    /// Returns a fresh id starting with `prefix` (`user`, `survey`, `submission`).
    fn next_id(&self, prefix: &str) -> String;
}

/// Random UUIDv4 identifiers: `survey_6f1c…`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self, prefix: &str) -> String {
        format!("{}_{}", prefix, uuid::Uuid::new_v4().simple())
    }
}
