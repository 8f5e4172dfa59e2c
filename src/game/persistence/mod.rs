//! Persistence Module
//!
//! Saving constructions outside the interaction loop:
//! - Named creations in a [`CreationStore`], driven off-thread by [`StoreWorker`]
//! - The device-local [`LocalCache`] of the editor state
//! - [`AutosaveDebouncer`] coalescing edits into cache writes
//!
//! Failures never roll back local state. They are reported as [`Notice`]s.

pub mod autosave;
pub mod creation_store;
pub mod local_cache;
pub mod store_worker;

pub use autosave::{AUTOSAVE_DELAY, AutosaveDebouncer};
pub use creation_store::{Creation, CreationStore, JsonDirCreationStore, MemoryCreationStore};
pub use local_cache::{CachedState, FileLocalCache, LocalCache, MemoryLocalCache};
pub use store_worker::{StoreCommand, StoreEvent, StoreOp, StoreWorker};

pub type PersistenceResult<T> = Result<T, PersistenceError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PersistenceError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
    #[error("Creation not found: {0}")]
    NotFound(String),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Deserialization error: {0}")]
    DeserializationError(String),
    #[error("Worker stopped")]
    WorkerStopped,
}

impl From<std::io::Error> for PersistenceError {
    fn from(e: std::io::Error) -> Self {
        PersistenceError::IoError(e.to_string())
    }
}

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// A message for the UI collaborator to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}
