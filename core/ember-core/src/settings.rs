//! Widget host settings (`widget.json`).
//!
//! Missing fields take defaults, and a missing or corrupt file yields
//! `WidgetSettings::default()`.

use std::time::Duration;

use chrono::{DateTime, Utc};
use fs_err as fs;
use serde::{Deserialize, Serialize};

use crate::error::{EmberError, Result};
use crate::quick_log::StreakPolicy;
use crate::storage::StorageConfig;

pub const DEFAULT_APP_GROUP: &str = "group.com.lristic.ember";
pub const DEFAULT_REFRESH_INTERVAL_MINUTES: u32 = 15;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, uniffi::Record)]
#[serde(default)]
pub struct WidgetSettings {
    pub app_group: String,
    pub streak_policy: StreakPolicy,
    /// How often the host should re-render on its own.
    pub refresh_interval_minutes: u32,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        WidgetSettings {
            app_group: DEFAULT_APP_GROUP.to_string(),
            streak_policy: StreakPolicy::default(),
            refresh_interval_minutes: DEFAULT_REFRESH_INTERVAL_MINUTES,
        }
    }
}

impl WidgetSettings {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(u64::from(self.refresh_interval_minutes.max(1)) * 60)
    }

    /// When the host should schedule the next refresh after rendering at `now`.
    pub fn next_refresh_after(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now + chrono::Duration::minutes(i64::from(self.refresh_interval_minutes.max(1)))
    }
}

/// Reads settings strictly: `Ok(None)` if the file doesn't exist.
pub fn read_settings(storage: &StorageConfig) -> Result<Option<WidgetSettings>> {
    let path = storage.settings_file();
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path).map_err(|e| EmberError::io("reading settings", e))?;
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| EmberError::SettingsMalformed {
            path,
            details: e.to_string(),
        })
}

/// Loads settings, returning defaults if the file is missing or unreadable.
pub fn load_settings(storage: &StorageConfig) -> WidgetSettings {
    match read_settings(storage) {
        Ok(settings) => settings.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(error = %e, "Using default widget settings");
            WidgetSettings::default()
        }
    }
}

pub fn save_settings(storage: &StorageConfig, settings: &WidgetSettings) -> Result<()> {
    let path = storage.settings_file();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| EmberError::io("creating settings directory", e))?;
    }
    let content = serde_json::to_string_pretty(settings)
        .map_err(|e| EmberError::json("serializing settings", e))?;
    fs::write(&path, content).map_err(|e| EmberError::io("writing settings", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn storage() -> (TempDir, StorageConfig) {
        let dir = TempDir::new().unwrap();
        let storage = StorageConfig::with_root(dir.path().to_path_buf());
        (dir, storage)
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let (_dir, storage) = storage();
        assert_eq!(load_settings(&storage), WidgetSettings::default());
        assert_eq!(read_settings(&storage).unwrap(), None);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let (_dir, storage) = storage();
        std::fs::write(storage.settings_file(), r#"{"streak_policy": "maintain"}"#).unwrap();

        let settings = load_settings(&storage);
        assert_eq!(settings.streak_policy, StreakPolicy::Maintain);
        assert_eq!(settings.app_group, DEFAULT_APP_GROUP);
        assert_eq!(settings.refresh_interval_minutes, 15);
    }

    #[test]
    fn test_corrupt_file_is_reported_strictly_but_loads_defaults() {
        let (_dir, storage) = storage();
        std::fs::write(storage.settings_file(), "streak_policy = maintain").unwrap();

        assert!(matches!(
            read_settings(&storage),
            Err(EmberError::SettingsMalformed { .. })
        ));
        assert_eq!(load_settings(&storage), WidgetSettings::default());
    }

    #[test]
    fn test_save_then_load() {
        let (_dir, storage) = storage();
        let settings = WidgetSettings {
            app_group: "group.test".to_string(),
            streak_policy: StreakPolicy::Maintain,
            refresh_interval_minutes: 30,
        };
        save_settings(&storage, &settings).unwrap();
        assert_eq!(load_settings(&storage), settings);
    }

    #[test]
    fn test_next_refresh_uses_interval() {
        let now = Utc.with_ymd_and_hms(2026, 1, 21, 9, 0, 0).unwrap();
        let settings = WidgetSettings::default();
        assert_eq!(
            settings.next_refresh_after(now),
            Utc.with_ymd_and_hms(2026, 1, 21, 9, 15, 0).unwrap()
        );
        assert_eq!(settings.refresh_interval(), Duration::from_secs(900));
    }
}
