//! Shared key-value store access.
//!
//! # Architecture
//!
//! The store is owned by the host OS (SharedPreferences on Android, app-group
//! UserDefaults on iOS) and shared by two writers:
//!
//! ```text
//! Main App ──▶ available_activities, activity_<id> ──▶ Widget (reader)
//! Widget   ──▶ activity_<id>, pending_widget_logs  ──▶ Main App (drains queue)
//! Config   ──▶ widget_<widgetId>_activity_id
//! ```
//!
//! Every value is a string. Writes are atomic per key but nothing spans keys:
//! there is no locking, versioning or compare-and-swap, and the last writer
//! wins. Implementations must not try to add stronger guarantees than the
//! host store has.
//!
//! # Module Structure
//!
//! - [`keys`]: key naming
//! - [`memory`]: in-process map for tests and embedding
//! - [`file`]: one JSON object file per app group, for the CLI host
//! - [`host`]: adapter over a store implemented by Swift/Kotlin

pub mod file;
pub mod host;
pub mod keys;
pub mod memory;

pub use file::FileStore;
pub use host::{HostKeyValueStore, HostStore};
pub use memory::MemoryStore;

use crate::error::Result;
use crate::pending::{append_entry, PendingLogEntry};

pub trait SharedStore {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn put(&mut self, key: &str, value: String) -> Result<()>;

    fn remove(&mut self, key: &str) -> Result<()>;

    /// Appends to the pending-log queue, creating it if absent or corrupt.
    fn append_pending_log(&mut self, entry: &PendingLogEntry) -> Result<()> {
        let current = self.get(keys::PENDING_LOGS)?;
        let updated = append_entry(current.as_deref(), entry)?;
        self.put(keys::PENDING_LOGS, updated)
    }
}

impl<S: SharedStore + ?Sized> SharedStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn put(&mut self, key: &str, value: String) -> Result<()> {
        (**self).put(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }

    fn append_pending_log(&mut self, entry: &PendingLogEntry) -> Result<()> {
        (**self).append_pending_log(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pending::decode_entries;

    #[test]
    fn test_append_pending_log_through_trait() {
        let mut store = MemoryStore::new();
        let entry = PendingLogEntry {
            habit_id: "a".to_string(),
            value: 1.0,
            timestamp: 10,
        };
        store.append_pending_log(&entry).unwrap();
        store.append_pending_log(&entry).unwrap();

        let raw = store.get(keys::PENDING_LOGS).unwrap();
        assert_eq!(decode_entries(raw.as_deref()).len(), 2);
    }

    #[test]
    fn test_boxed_store_forwards() {
        let mut store: Box<dyn SharedStore> = Box::new(MemoryStore::new());
        store.put("k", "v".to_string()).unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }
}
