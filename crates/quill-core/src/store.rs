//! Key-value persistence abstraction backing the engine's learned state.
//!
//! Two slots are used: a string set for the learned words and a plain string
//! for the serialized bigram map. `MemoryStore` backs tests and embedding
//! hosts with their own persistence; `FileStore` keeps a single JSON
//! document on disk with atomic tmp-then-rename writes.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

pub const KEY_USER_WORDS: &str = "user_words";
pub const KEY_USER_BIGRAMS: &str = "user_bigrams";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage I/O: {0}")]
    Io(#[from] io::Error),
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

pub trait KeyValueStore: Send + Sync {
    /// Missing keys read as an empty set.
    fn get_string_set(&self, key: &str) -> Result<BTreeSet<String>, StoreError>;
    fn put_string_set(&self, key: &str, value: &BTreeSet<String>) -> Result<(), StoreError>;
    /// Missing keys read as `None`.
    fn get_string(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn put_string(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct MemoryStore {
    sets: RwLock<HashMap<String, BTreeSet<String>>>,
    strings: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_string_set(&self, key: &str) -> Result<BTreeSet<String>, StoreError> {
        let sets = self.sets.read().expect("store lock poisoned");
        Ok(sets.get(key).cloned().unwrap_or_default())
    }

    fn put_string_set(&self, key: &str, value: &BTreeSet<String>) -> Result<(), StoreError> {
        let mut sets = self.sets.write().expect("store lock poisoned");
        sets.insert(key.to_string(), value.clone());
        Ok(())
    }

    fn get_string(&self, key: &str) -> Result<Option<String>, StoreError> {
        let strings = self.strings.read().expect("store lock poisoned");
        Ok(strings.get(key).cloned())
    }

    fn put_string(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut strings = self.strings.write().expect("store lock poisoned");
        strings.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FileStore
// ---------------------------------------------------------------------------

/// On-disk document: both slot kinds in one JSON file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDoc {
    #[serde(default)]
    sets: BTreeMap<String, BTreeSet<String>>,
    #[serde(default)]
    strings: BTreeMap<String, String>,
}

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    doc: RwLock<StoreDoc>,
}

impl FileStore {
    /// Open from file, starting empty if the file doesn't exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let doc = match fs::read_to_string(&path) {
            Ok(raw) => {
                serde_json::from_str(&raw).map_err(|e| StoreError::Corrupt(e.to_string()))?
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => StoreDoc::default(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path,
            doc: RwLock::new(doc),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Atomic write: write to .tmp then rename.
    fn write_doc(&self, doc: &StoreDoc) -> Result<(), StoreError> {
        let body =
            serde_json::to_vec_pretty(doc).map_err(|e| StoreError::Corrupt(e.to_string()))?;
        let tmp = self.path.with_extension("tmp");
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&tmp, &body)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get_string_set(&self, key: &str) -> Result<BTreeSet<String>, StoreError> {
        let doc = self.doc.read().expect("store lock poisoned");
        Ok(doc.sets.get(key).cloned().unwrap_or_default())
    }

    fn put_string_set(&self, key: &str, value: &BTreeSet<String>) -> Result<(), StoreError> {
        let mut doc = self.doc.write().expect("store lock poisoned");
        doc.sets.insert(key.to_string(), value.clone());
        self.write_doc(&doc)
    }

    fn get_string(&self, key: &str) -> Result<Option<String>, StoreError> {
        let doc = self.doc.read().expect("store lock poisoned");
        Ok(doc.strings.get(key).cloned())
    }

    fn put_string(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut doc = self.doc.write().expect("store lock poisoned");
        doc.strings.insert(key.to_string(), value.to_string());
        self.write_doc(&doc)
    }
}
