//! Creation Store
//!
//! Named, saved constructions. The store is a collaborator: the editor only
//! talks to it through [`CreationStore`], usually from a [`super::StoreWorker`]
//! thread.
//!
//! Creations are listed newest-first by `updated_at`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{PersistenceError, PersistenceResult};
use crate::game::building::Block;

/// Length of generated creation ids.
pub const CREATION_ID_LEN: usize = 10;

/// URL-safe id alphabet.
const ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// A saved construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Creation {
    pub id: String,
    pub name: String,
    #[serde(alias = "bricks")]
    pub blocks: Vec<Block>,
    /// Milliseconds since the Unix epoch
    pub created_at: i64,
    /// Milliseconds since the Unix epoch
    pub updated_at: i64,
}

/// Remote storage for named creations.
pub trait CreationStore {
    /// Whether the backend is configured and reachable.
    fn is_available(&self) -> bool;

    /// Store a new creation and return its id.
    fn save(&mut self, name: &str, blocks: &[Block]) -> PersistenceResult<String>;

    /// Replace the name and blocks of an existing creation.
    fn update(&mut self, id: &str, name: &str, blocks: &[Block]) -> PersistenceResult<()>;

    /// Page through creations, newest first.
    fn list(&self, limit: usize, offset: usize) -> PersistenceResult<Vec<Creation>>;

    fn get(&self, id: &str) -> PersistenceResult<Creation>;

    /// Remove a creation. Removing an unknown id succeeds.
    fn delete(&mut self, id: &str) -> PersistenceResult<()>;
}

/// Random 10-character URL-safe id.
pub fn generate_creation_id() -> String {
    let mut rng = rand::thread_rng();
    (0..CREATION_ID_LEN)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

/// Current time in epoch milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

fn page(creations: Vec<Creation>, limit: usize, offset: usize) -> Vec<Creation> {
    creations.into_iter().skip(offset).take(limit).collect()
}

/// In-process store.
#[derive(Debug, Default)]
pub struct MemoryCreationStore {
    creations: HashMap<String, Creation>,
    /// Ids in order of last write; breaks ties between equal timestamps
    touched: Vec<String>,
}

impl MemoryCreationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.creations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.creations.is_empty()
    }

    fn touch(&mut self, id: &str) {
        self.touched.retain(|t| t != id);
        self.touched.push(id.to_string());
    }
}

impl CreationStore for MemoryCreationStore {
    fn is_available(&self) -> bool {
        true
    }

    fn save(&mut self, name: &str, blocks: &[Block]) -> PersistenceResult<String> {
        let mut id = generate_creation_id();
        while self.creations.contains_key(&id) {
            id = generate_creation_id();
        }
        let timestamp = now_millis();
        self.creations.insert(
            id.clone(),
            Creation {
                id: id.clone(),
                name: name.to_string(),
                blocks: blocks.to_vec(),
                created_at: timestamp,
                updated_at: timestamp,
            },
        );
        self.touch(&id);
        Ok(id)
    }

    fn update(&mut self, id: &str, name: &str, blocks: &[Block]) -> PersistenceResult<()> {
        let creation = self
            .creations
            .get_mut(id)
            .ok_or_else(|| PersistenceError::NotFound(id.to_string()))?;
        creation.name = name.to_string();
        creation.blocks = blocks.to_vec();
        creation.updated_at = now_millis().max(creation.updated_at);
        self.touch(id);
        Ok(())
    }

    fn list(&self, limit: usize, offset: usize) -> PersistenceResult<Vec<Creation>> {
        let mut creations: Vec<Creation> = self
            .touched
            .iter()
            .rev()
            .filter_map(|id| self.creations.get(id).cloned())
            .collect();
        // Stable: equal timestamps keep most-recently-written first
        creations.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(page(creations, limit, offset))
    }

    fn get(&self, id: &str) -> PersistenceResult<Creation> {
        self.creations
            .get(id)
            .cloned()
            .ok_or_else(|| PersistenceError::NotFound(id.to_string()))
    }

    fn delete(&mut self, id: &str) -> PersistenceResult<()> {
        self.creations.remove(id);
        self.touched.retain(|t| t != id);
        Ok(())
    }
}

/// One pretty-printed JSON file per creation in a directory.
#[derive(Debug, Clone)]
pub struct JsonDirCreationStore {
    dir: PathBuf,
}

impl JsonDirCreationStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &str) -> PersistenceResult<PathBuf> {
        let valid = !id.is_empty() && id.bytes().all(|b| ID_ALPHABET.contains(&b));
        if !valid {
            return Err(PersistenceError::NotFound(id.to_string()));
        }
        Ok(self.dir.join(format!("{id}.json")))
    }

    fn write(&self, creation: &Creation) -> PersistenceResult<()> {
        let json = serde_json::to_string_pretty(creation)
            .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(&creation.id)?, json)?;
        Ok(())
    }

    fn read(path: &Path) -> PersistenceResult<Creation> {
        let data = std::fs::read_to_string(path)?;
        serde_json::from_str(&data).map_err(|e| PersistenceError::DeserializationError(e.to_string()))
    }
}

impl CreationStore for JsonDirCreationStore {
    fn is_available(&self) -> bool {
        std::fs::create_dir_all(&self.dir).is_ok() && self.dir.is_dir()
    }

    fn save(&mut self, name: &str, blocks: &[Block]) -> PersistenceResult<String> {
        let mut id = generate_creation_id();
        while self.path_for(&id)?.exists() {
            id = generate_creation_id();
        }
        let timestamp = now_millis();
        self.write(&Creation {
            id: id.clone(),
            name: name.to_string(),
            blocks: blocks.to_vec(),
            created_at: timestamp,
            updated_at: timestamp,
        })?;
        Ok(id)
    }

    fn update(&mut self, id: &str, name: &str, blocks: &[Block]) -> PersistenceResult<()> {
        let mut creation = self.get(id)?;
        creation.name = name.to_string();
        creation.blocks = blocks.to_vec();
        creation.updated_at = now_millis().max(creation.updated_at);
        self.write(&creation)
    }

    fn list(&self, limit: usize, offset: usize) -> PersistenceResult<Vec<Creation>> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut creations = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match Self::read(&path) {
                Ok(creation) => creations.push(creation),
                Err(e) => log::warn!("[Store] Skipping {}: {}", path.display(), e),
            }
        }

        creations.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then_with(|| b.id.cmp(&a.id)));
        Ok(page(creations, limit, offset))
    }

    fn get(&self, id: &str) -> PersistenceResult<Creation> {
        let path = self.path_for(id)?;
        if !path.exists() {
            return Err(PersistenceError::NotFound(id.to_string()));
        }
        Self::read(&path)
    }

    fn delete(&mut self, id: &str) -> PersistenceResult<()> {
        let path = self.path_for(id)?;
        match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
