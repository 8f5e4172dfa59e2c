//! Local Cache
//!
//! Device-local copy of the editor state, restored on the next launch.
//! Anything unreadable loads as "no saved state".

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::{PersistenceError, PersistenceResult};
use crate::game::building::{Block, ColorTheme, DEFAULT_COLOR};
use crate::game::builder::tools::DEFAULT_BRICK_SIZE;

fn default_size() -> u32 {
    DEFAULT_BRICK_SIZE
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

/// Editor state persisted between launches.
///
/// Older caches used `bricks`, `height` and `currentTheme`; those keys are
/// still accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedState {
    #[serde(alias = "bricks", default)]
    pub blocks: Vec<Block>,
    #[serde(default = "default_size")]
    pub width: u32,
    #[serde(alias = "height", default = "default_size")]
    pub depth: u32,
    #[serde(default = "default_color")]
    pub selected_color: String,
    #[serde(alias = "currentTheme", default)]
    pub theme: ColorTheme,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_name: Option<String>,
}

pub trait LocalCache {
    fn save(&mut self, state: &CachedState) -> PersistenceResult<()>;

    /// Saved state, or `None` when missing or malformed.
    fn load(&self) -> Option<CachedState>;

    fn clear(&mut self) -> PersistenceResult<()>;

    fn is_available(&self) -> bool;
}

fn parse_state(data: &str) -> Option<CachedState> {
    match serde_json::from_str(data) {
        Ok(state) => Some(state),
        Err(e) => {
            log::warn!("[Cache] Ignoring malformed cached state: {}", e);
            None
        }
    }
}

fn encode_state(state: &CachedState) -> PersistenceResult<String> {
    serde_json::to_string(state).map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

/// JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileLocalCache {
    path: PathBuf,
}

impl FileLocalCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LocalCache for FileLocalCache {
    fn save(&mut self, state: &CachedState) -> PersistenceResult<()> {
        let json = encode_state(state)?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    fn load(&self) -> Option<CachedState> {
        let data = std::fs::read_to_string(&self.path).ok()?;
        parse_state(&data)
    }

    fn clear(&mut self) -> PersistenceResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Writes and removes a probe file next to the cache.
    fn is_available(&self) -> bool {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let probe = dir.join(".block_forge_probe");
        std::fs::create_dir_all(&dir).is_ok()
            && std::fs::write(&probe, b"probe").is_ok()
            && std::fs::remove_file(&probe).is_ok()
    }
}

/// In-memory cache holding the serialized state.
#[derive(Debug, Clone)]
pub struct MemoryLocalCache {
    data: Option<String>,
    available: bool,
}

impl Default for MemoryLocalCache {
    fn default() -> Self {
        Self {
            data: None,
            available: true,
        }
    }
}

impl MemoryLocalCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache pre-filled with raw JSON, as if written by an earlier session.
    pub fn with_raw(data: impl Into<String>) -> Self {
        Self {
            data: Some(data.into()),
            available: true,
        }
    }

    /// Cache that rejects every write.
    pub fn unavailable() -> Self {
        Self {
            data: None,
            available: false,
        }
    }

    pub fn raw(&self) -> Option<&str> {
        self.data.as_deref()
    }
}

impl LocalCache for MemoryLocalCache {
    fn save(&mut self, state: &CachedState) -> PersistenceResult<()> {
        if !self.available {
            return Err(PersistenceError::Unavailable("local cache".to_string()));
        }
        self.data = Some(encode_state(state)?);
        Ok(())
    }

    fn load(&self) -> Option<CachedState> {
        parse_state(self.data.as_deref()?)
    }

    fn clear(&mut self) -> PersistenceResult<()> {
        self.data = None;
        Ok(())
    }

    fn is_available(&self) -> bool {
        self.available
    }
}
