//! WidgetEngine - the entry point for widget hosts.
//!
//! Each host event maps to one call:
//!
//! | host event                      | call                                   |
//! |---------------------------------|----------------------------------------|
//! | timeline refresh / onUpdate     | [`WidgetEngine::render_widget`]        |
//! | quick-log tap                   | [`WidgetEngine::quick_log`]            |
//! | configuration screen opened     | [`WidgetEngine::configuration_items`]  |
//! | activity picked                 | [`WidgetEngine::select_item`]          |
//! | widget deleted                  | [`WidgetEngine::remove_widget`]        |
//! | app opened from an `ember://` link | [`WidgetEngine::open_deep_link`]    |
//!
//! Calls are synchronous and independent. The engine caches nothing: every
//! call re-reads the store, since the main app may have written it between
//! invocations. Rendering never fails; a missing or unreadable snapshot
//! renders as "not configured".

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::Serialize;

use crate::configure::{
    choose, configuration_items, parse_available_activities, AvailableActivity,
    ConfigurationItem, ConfigurationOutcome, INVALID_WIDGET_ID,
};
use crate::error::{EmberFfiError, Result};
use crate::links::DeepLink;
use crate::pending::{decode_entries, PendingLogEntry};
use crate::quick_log::{apply_quick_log, StreakPolicy};
use crate::render::{render, WidgetView};
use crate::settings::{load_settings, WidgetSettings};
use crate::snapshot::{parse_object, ActivitySnapshot, WidgetEntry};
use crate::storage::StorageConfig;
use crate::store::{keys, FileStore, HostKeyValueStore, HostStore, SharedStore};
use crate::week::week_index;

type BoxedStore = Box<dyn SharedStore + Send>;

/// Result of one quick-log tap.
#[derive(Debug, Clone, PartialEq, Serialize, uniffi::Record)]
pub struct QuickLogReport {
    pub habit_id: String,
    /// False when there was no readable snapshot to update.
    pub logged: bool,
    pub previous_value: Option<f64>,
    pub new_value: Option<f64>,
    pub current_streak: Option<u32>,
    /// The one widget instance to redraw, if the tap came from a widget.
    pub redraw_widget_id: Option<i32>,
}

impl QuickLogReport {
    fn skipped(habit_id: &str) -> Self {
        QuickLogReport {
            habit_id: habit_id.to_string(),
            logged: false,
            previous_value: None,
            new_value: None,
            current_streak: None,
            redraw_widget_id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, uniffi::Enum)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeepLinkOutcome {
    /// Open the app, focused on this activity if any.
    Open { habit_id: Option<String> },
    /// The log was applied; open the app on the activity afterwards.
    Logged { report: QuickLogReport },
}

#[derive(uniffi::Object)]
pub struct WidgetEngine {
    store: Mutex<BoxedStore>,
    settings: WidgetSettings,
}

impl WidgetEngine {
    /// Creates an engine over any store. Not exposed to FFI.
    pub fn with_store(store: impl SharedStore + Send + 'static, settings: WidgetSettings) -> Self {
        WidgetEngine {
            store: Mutex::new(Box::new(store)),
            settings,
        }
    }

    /// File-backed engine under `storage`, using its `widget.json` settings.
    pub fn with_storage(storage: &StorageConfig) -> Self {
        let settings = load_settings(storage);
        let store = FileStore::new(storage.store_file(&settings.app_group));
        tracing::debug!(path = %store.path().display(), "Using file-backed store");
        Self::with_store(store, settings)
    }

    pub fn settings_ref(&self) -> &WidgetSettings {
        &self.settings
    }

    /// The entry a widget should show: its bound activity's snapshot, or
    /// "not configured".
    pub fn entry_for_widget(&self, widget_id: i32) -> WidgetEntry {
        let store = self.lock_store();

        let activity_id = match read_binding(&**store, widget_id) {
            Ok(Some(id)) => id,
            Ok(None) => return WidgetEntry::NotConfigured,
            Err(e) => {
                tracing::warn!(widget_id, error = %e, "Failed to read widget binding");
                return WidgetEntry::NotConfigured;
            }
        };

        match store.get(&keys::activity(&activity_id)) {
            Ok(raw) => match ActivitySnapshot::decode(raw.as_deref(), &activity_id) {
                Some(snapshot) => WidgetEntry::Activity { snapshot },
                None => {
                    tracing::debug!(widget_id, activity_id = %activity_id, "No readable snapshot");
                    WidgetEntry::NotConfigured
                }
            },
            Err(e) => {
                tracing::warn!(widget_id, error = %e, "Failed to read activity snapshot");
                WidgetEntry::NotConfigured
            }
        }
    }

    /// Applies one quick-log at `now`.
    ///
    /// `widget_id` is the invoking widget instance, or `None` when the log
    /// arrives through a deep link.
    pub fn quick_log_at<Tz: TimeZone>(
        &self,
        widget_id: Option<i32>,
        habit_id: &str,
        now: &DateTime<Tz>,
    ) -> Result<QuickLogReport> {
        let mut store = self.lock_store();
        let key = keys::activity(habit_id);

        let Some(raw) = store.get(&key)? else {
            tracing::debug!(habit_id, "Quick-log ignored, no snapshot");
            return Ok(QuickLogReport::skipped(habit_id));
        };
        let Some(mut object) = parse_object(&raw) else {
            tracing::warn!(habit_id, "Quick-log ignored, snapshot unreadable");
            return Ok(QuickLogReport::skipped(habit_id));
        };

        let snapshot = ActivitySnapshot::from_object(&object, habit_id);
        let result = apply_quick_log(
            &snapshot,
            week_index(now.date_naive()),
            self.settings.streak_policy,
        );

        result.snapshot.write_day_fields(&mut object);
        if self.settings.streak_policy == StreakPolicy::Maintain {
            result.snapshot.write_streak(&mut object);
        }
        store.put(&key, serde_json::Value::Object(object).to_string())?;

        // Not transactional with the write above: a failure here leaves the
        // snapshot updated without a queue entry.
        store.append_pending_log(&PendingLogEntry {
            habit_id: habit_id.to_string(),
            value: result.new_value,
            timestamp: now.timestamp_millis(),
        })?;

        tracing::info!(
            habit_id,
            previous = result.previous_value,
            value = result.new_value,
            streak = result.snapshot.current_streak,
            "Quick-log applied"
        );

        Ok(QuickLogReport {
            habit_id: habit_id.to_string(),
            logged: true,
            previous_value: Some(result.previous_value),
            new_value: Some(result.new_value),
            current_streak: Some(result.snapshot.current_streak),
            redraw_widget_id: widget_id.filter(|id| *id != INVALID_WIDGET_ID),
        })
    }

    pub fn open_deep_link_at<Tz: TimeZone>(
        &self,
        url: &str,
        now: &DateTime<Tz>,
    ) -> Result<DeepLinkOutcome> {
        match DeepLink::parse(url)? {
            DeepLink::Open { habit_id } => Ok(DeepLinkOutcome::Open { habit_id }),
            DeepLink::Log { habit_id } => Ok(DeepLinkOutcome::Logged {
                report: self.quick_log_at(None, &habit_id, now)?,
            }),
        }
    }

    pub fn available_activities(&self) -> Vec<AvailableActivity> {
        let raw = self
            .lock_store()
            .get(keys::AVAILABLE_ACTIVITIES)
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Failed to read available activities");
                None
            });
        parse_available_activities(raw.as_deref())
    }

    fn lock_store(&self) -> MutexGuard<'_, BoxedStore> {
        self.store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for WidgetEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[uniffi::export]
impl WidgetEngine {
    /// File-backed engine at the default storage location.
    #[uniffi::constructor]
    pub fn new() -> Self {
        Self::with_storage(&StorageConfig::default())
    }

    /// Engine over the platform's own app-group store.
    #[uniffi::constructor]
    pub fn with_host_store(store: Arc<dyn HostKeyValueStore>, settings: WidgetSettings) -> Self {
        Self::with_store(HostStore::new(store), settings)
    }

    pub fn settings(&self) -> WidgetSettings {
        self.settings.clone()
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────────────────────

    pub fn render_widget(&self, widget_id: i32) -> WidgetView {
        render(&self.entry_for_widget(widget_id), widget_id)
    }

    /// Gallery preview with sample data.
    pub fn placeholder_view(&self) -> WidgetView {
        render(
            &WidgetEntry::Placeholder {
                snapshot: ActivitySnapshot::placeholder(),
            },
            INVALID_WIDGET_ID,
        )
    }

    /// Epoch milliseconds at which the host should refresh next.
    pub fn next_refresh_epoch_ms(&self) -> i64 {
        self.settings.next_refresh_after(Utc::now()).timestamp_millis()
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Quick-Log
    // ─────────────────────────────────────────────────────────────────────────────

    pub fn quick_log(
        &self,
        widget_id: i32,
        habit_id: String,
    ) -> std::result::Result<QuickLogReport, EmberFfiError> {
        self.quick_log_at(Some(widget_id), &habit_id, &Local::now())
            .map_err(EmberFfiError::from)
    }

    pub fn open_deep_link(
        &self,
        url: String,
    ) -> std::result::Result<DeepLinkOutcome, EmberFfiError> {
        self.open_deep_link_at(&url, &Local::now())
            .map_err(EmberFfiError::from)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Configuration
    // ─────────────────────────────────────────────────────────────────────────────

    pub fn configuration_items(&self) -> Vec<ConfigurationItem> {
        configuration_items(&self.available_activities())
    }

    /// Applies a picker choice. Only an activity choice writes a binding.
    pub fn select_item(
        &self,
        widget_id: i32,
        item: ConfigurationItem,
    ) -> std::result::Result<ConfigurationOutcome, EmberFfiError> {
        let outcome = choose(widget_id, &item);
        if let ConfigurationOutcome::Bound { binding } = &outcome {
            self.lock_store()
                .put(
                    &keys::widget_binding(binding.widget_id),
                    binding.activity_id.clone(),
                )
                .map_err(EmberFfiError::from)?;
            tracing::info!(
                widget_id = binding.widget_id,
                activity_id = %binding.activity_id,
                "Widget bound"
            );
        }
        Ok(outcome)
    }

    /// Binds by activity id, for hosts whose picker returns ids.
    ///
    /// Unknown ids cancel the configuration.
    pub fn select_activity(
        &self,
        widget_id: i32,
        activity_id: String,
    ) -> std::result::Result<ConfigurationOutcome, EmberFfiError> {
        let item = self
            .configuration_items()
            .into_iter()
            .find(|item| {
                matches!(item, ConfigurationItem::Activity { activity } if activity.id == activity_id)
            });

        match item {
            Some(item) => self.select_item(widget_id, item),
            None => {
                tracing::warn!(widget_id, activity_id = %activity_id, "Unknown activity selected");
                Ok(ConfigurationOutcome::Cancelled)
            }
        }
    }

    pub fn bound_activity(&self, widget_id: i32) -> Option<String> {
        read_binding(&**self.lock_store(), widget_id).unwrap_or_else(|e| {
            tracing::warn!(widget_id, error = %e, "Failed to read widget binding");
            None
        })
    }

    /// Deletes the binding of a removed widget instance.
    pub fn remove_widget(&self, widget_id: i32) -> std::result::Result<(), EmberFfiError> {
        self.lock_store()
            .remove(&keys::widget_binding(widget_id))
            .map_err(EmberFfiError::from)?;
        tracing::info!(widget_id, "Widget binding removed");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Pending Queue (main app side)
    // ─────────────────────────────────────────────────────────────────────────────

    pub fn pending_logs(&self) -> Vec<PendingLogEntry> {
        let raw = self
            .lock_store()
            .get(keys::PENDING_LOGS)
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Failed to read pending logs");
                None
            });
        decode_entries(raw.as_deref())
    }

    /// Reads and clears the queue, for the main app's foreground sync.
    pub fn take_pending_logs(&self) -> std::result::Result<Vec<PendingLogEntry>, EmberFfiError> {
        let mut store = self.lock_store();
        let raw = store.get(keys::PENDING_LOGS).map_err(EmberFfiError::from)?;
        store.remove(keys::PENDING_LOGS).map_err(EmberFfiError::from)?;
        Ok(decode_entries(raw.as_deref()))
    }
}

fn read_binding(store: &dyn SharedStore, widget_id: i32) -> Result<Option<String>> {
    Ok(store
        .get(&keys::widget_binding(widget_id))?
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty() && id != "null"))
}
