//! Store implemented by the widget extension itself.
//!
//! Swift implements [`HostKeyValueStore`] over `UserDefaults(suiteName:)` and
//! Kotlin over `SharedPreferences`; the engine only sees [`SharedStore`].

use std::sync::Arc;

use super::SharedStore;
use crate::error::Result;

/// String key-value access provided by the platform.
///
/// Platform stores don't report failures for these calls, so neither does
/// this trait.
#[uniffi::export(with_foreign)]
pub trait HostKeyValueStore: Send + Sync {
    fn get_string(&self, key: String) -> Option<String>;
    fn set_string(&self, key: String, value: String);
    fn remove_key(&self, key: String);
}

pub struct HostStore {
    inner: Arc<dyn HostKeyValueStore>,
}

impl HostStore {
    pub fn new(inner: Arc<dyn HostKeyValueStore>) -> Self {
        HostStore { inner }
    }
}

impl SharedStore for HostStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.inner.get_string(key.to_string()))
    }

    fn put(&mut self, key: &str, value: String) -> Result<()> {
        self.inner.set_string(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.inner.remove_key(key.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Prefs(Mutex<HashMap<String, String>>);

    impl HostKeyValueStore for Prefs {
        fn get_string(&self, key: String) -> Option<String> {
            self.0.lock().unwrap().get(&key).cloned()
        }

        fn set_string(&self, key: String, value: String) {
            self.0.lock().unwrap().insert(key, value);
        }

        fn remove_key(&self, key: String) {
            self.0.lock().unwrap().remove(&key);
        }
    }

    #[test]
    fn test_host_store_delegates() {
        let prefs = Arc::new(Prefs::default());
        let mut store = HostStore::new(prefs.clone());

        store.put("activity_a", "{}".to_string()).unwrap();
        assert_eq!(prefs.get_string("activity_a".to_string()).as_deref(), Some("{}"));

        store.remove("activity_a").unwrap();
        assert_eq!(store.get("activity_a").unwrap(), None);
    }
}
