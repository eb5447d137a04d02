//! Infrastructure layer of the Lorebook chat core.
//!
//! Provides the concrete storage adapters behind the domain layer's
//! `KeyValueStorage` boundary, platform path resolution, and configuration
//! file loading.

pub mod atomic_file;
pub mod config_loader;
pub mod file_storage;
pub mod memory_storage;
pub mod paths;

pub use atomic_file::AtomicFile;
pub use config_loader::{load_config, load_config_from, save_config};
pub use file_storage::FileKeyValueStorage;
pub use memory_storage::MemoryKeyValueStorage;
pub use paths::LorebookPaths;
