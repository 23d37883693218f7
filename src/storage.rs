//! Key/value persistence standing in for browser local storage.
//! Values are JSON strings, one file per key.

use std::{
    cell::RefCell,
    collections::HashMap,
    path::PathBuf,
};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{AppError, AppResult};

pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> AppResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> AppResult<()>;
}

/// Reads and deserializes `key`. A blob that does not parse is treated as absent.
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> AppResult<Option<T>> {
    let Some(raw) = store.get_item(key)? else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            log::warn!("ignoring unreadable cache entry {key}: {e}");
            Ok(None)
        }
    }
}

pub fn save_json<T: Serialize + ?Sized>(store: &dyn KeyValueStore, key: &str, value: &T) -> AppResult<()> {
    let raw = serde_json::to_string(value).map_err(|e| AppError::Storage(e.to_string()))?;
    store.set_item(key, &raw)
}

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn open(dir: impl Into<PathBuf>) -> AppResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .map_err(|e| AppError::Storage(format!("fail to create {}: {e}", dir.display())))?;
        log::debug!("using store directory {:?}", dir);
        Ok(Self { dir })
    }

    fn path(&self, key: &str) -> PathBuf {
        let file: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{file}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        match std::fs::read_to_string(self.path(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Storage(format!("fail to read {key}: {e}"))),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> AppResult<()> {
        let path = self.path(key);
        // readers never see a partial blob
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)
            .and_then(|_| std::fs::rename(&tmp, &path))
            .map_err(|e| AppError::Storage(format!("fail to write {key}: {e}")))
    }
}

/// In-process store, used when nothing should touch the disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> AppResult<()> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
