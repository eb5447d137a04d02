//! Durable key-value storage boundary.
//!
//! Defines the interface the chat store persists through. The store is
//! serialized in full under a fixed key on every mutation and rehydrated
//! once at startup.

use async_trait::async_trait;

use crate::error::Result;

/// An abstract durable key-value store.
///
/// This trait decouples the chat core from the specific storage mechanism
/// (files on disk, browser storage behind a bridge, an in-memory map in
/// tests). Values are opaque serialized strings.
///
/// # Implementation Notes
///
/// Implementations should handle:
/// - Missing keys as `Ok(None)`, not as errors
/// - Concurrent access from one process if needed
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))`: Key found
    /// - `Ok(None)`: Key not present
    /// - `Err(_)`: Error occurred during retrieval
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key` and its value, if present.
    async fn remove(&self, key: &str) -> Result<()>;
}
