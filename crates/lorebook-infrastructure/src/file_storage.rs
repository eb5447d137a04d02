//! File-backed key-value storage.
//!
//! Stores each key as one file under a root directory, written through
//! [`AtomicFile`] so a crash mid-write never leaves a torn value. Blocking
//! file I/O runs on the blocking thread pool.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use lorebook_core::error::{LorebookError, Result};
use lorebook_core::storage::KeyValueStorage;

use crate::atomic_file::AtomicFile;

/// Durable key-value storage rooted at a directory.
///
/// Keys are simple names (e.g. `chat_sessions`) mapped to
/// `<root>/<key>.json`. Values are opaque serialized strings.
#[derive(Clone)]
pub struct FileKeyValueStorage {
    root: Arc<PathBuf>,
}

impl FileKeyValueStorage {
    /// Creates a storage instance rooted at `root`.
    ///
    /// The directory is created lazily on first write.
    pub fn new(root: PathBuf) -> Self {
        Self {
            root: Arc::new(root),
        }
    }

    fn file_for(&self, key: &str) -> AtomicFile {
        AtomicFile::new(self.root.join(format!("{}.json", key)))
    }
}

#[async_trait]
impl KeyValueStorage for FileKeyValueStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let file = self.file_for(key);
        tokio::task::spawn_blocking(move || file.load())
            .await
            .map_err(|e| LorebookError::internal(format!("Failed to join task: {}", e)))?
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let file = self.file_for(key);
        let value = value.to_string();
        tracing::debug!("[FileKeyValueStorage] Writing {} bytes under '{}'", value.len(), key);
        tokio::task::spawn_blocking(move || file.save(&value))
            .await
            .map_err(|e| LorebookError::internal(format!("Failed to join task: {}", e)))?
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let file = self.file_for(key);
        tokio::task::spawn_blocking(move || file.remove())
            .await
            .map_err(|e| LorebookError::internal(format!("Failed to join task: {}", e)))?
    }
}
