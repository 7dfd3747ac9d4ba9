//! File-backed store: one flat JSON object of string values per app group.
//!
//! ```json
//! {
//!   "available_activities": "[{\"id\":\"water\",...}]",
//!   "activity_water": "{\"todayValue\":3,...}",
//!   "widget_12_activity_id": "water"
//! }
//! ```
//!
//! Values stay strings so the layout matches the platform stores byte for
//! byte. The file is re-read on every access since another process may have
//! written it. Writes go through temp file + rename so a reader never sees a
//! partial file.
//!
//! A missing, empty or corrupt file reads as an empty store.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use fs_err as fs;
use serde_json::Value;
use tempfile::NamedTempFile;

use super::SharedStore;
use crate::error::{EmberError, Result};

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&self.path)
            .map_err(|e| EmberError::io("reading store file", e))?;

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        match serde_json::from_str::<BTreeMap<String, Value>>(&content) {
            Ok(entries) => Ok(entries
                .into_iter()
                .filter_map(|(key, value)| match value {
                    Value::String(s) => Some((key, s)),
                    Value::Null => None,
                    other => Some((key, other.to_string())),
                })
                .collect()),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Store file is corrupt, treating it as empty"
                );
                Ok(BTreeMap::new())
            }
        }
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let content = serde_json::to_string_pretty(entries)
            .map_err(|e| EmberError::json("serializing store file", e))?;

        let parent_dir = self
            .path
            .parent()
            .ok_or_else(|| EmberError::InvalidStorePath(self.path.clone()))?;
        fs::create_dir_all(parent_dir).map_err(|e| EmberError::io("creating store directory", e))?;

        let mut temp_file = NamedTempFile::new_in(parent_dir)
            .map_err(|e| EmberError::io("creating temp store file", e))?;
        temp_file
            .write_all(content.as_bytes())
            .map_err(|e| EmberError::io("writing temp store file", e))?;
        temp_file
            .flush()
            .map_err(|e| EmberError::io("flushing temp store file", e))?;
        temp_file
            .persist(&self.path)
            .map_err(|e| EmberError::io("replacing store file", e.error))?;

        Ok(())
    }
}

impl SharedStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn put(&mut self, key: &str, value: String) -> Result<()> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value);
        self.save(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }
}
