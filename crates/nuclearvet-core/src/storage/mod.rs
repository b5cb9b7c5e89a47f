//! Durable key/value storage for session state.
//!
//! The console keeps its session in a small string-keyed store that survives
//! restarts, the same way a browser keeps it in local storage:
//!
//! - `FileStorage`: a JSON object file on disk, re-read on every lookup
//! - `MemoryStorage`: process-local, used by tests and throwaway sessions

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use thiserror::Error;

/// Key holding the plain bearer token of the current session.
pub const TOKEN_KEY: &str = "token";

/// Key holding a JSON snapshot of the last known user record.
pub const USER_KEY: &str = "usuario";

/// Key holding the full session store snapshot used for rehydration.
pub const SESSION_SNAPSHOT_KEY: &str = "autenticacion-storage";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize storage contents: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// String key/value storage that outlives the process.
pub trait Storage: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}
