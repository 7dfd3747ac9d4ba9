//! Binding a widget instance to one activity.
//!
//! ```text
//! Unconfigured ──select activity──▶ Bound(widget_id → activity_id)
//!      │
//!      └──no activities yet──▶ fallback item ──tap──▶ launch main app (still unbound)
//! ```
//!
//! The activity list is written by the main app under `available_activities`.

use serde::Serialize;
use serde_json::Value;

use crate::links::open_url;
use crate::snapshot::text_field;

/// Host id that never refers to a real widget (Android's `INVALID_APPWIDGET_ID`).
pub const INVALID_WIDGET_ID: i32 = 0;

pub const OPEN_APP_FIRST_LABEL: &str = "Open the app first to create activities";
const UNKNOWN_ACTIVITY_NAME: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, uniffi::Record)]
pub struct AvailableActivity {
    pub id: String,
    pub name: String,
    pub emoji: Option<String>,
}

impl AvailableActivity {
    /// Picker title, e.g. "🏃 Running".
    pub fn display_title(&self) -> String {
        match &self.emoji {
            Some(emoji) => format!("{} {}", emoji, self.name),
            None => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, uniffi::Record)]
pub struct WidgetBinding {
    pub widget_id: i32,
    pub activity_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, uniffi::Enum)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConfigurationItem {
    Activity { activity: AvailableActivity },
    /// Shown alone when the main app hasn't published any activities.
    OpenAppFirst { label: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, uniffi::Enum)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConfigurationOutcome {
    Bound { binding: WidgetBinding },
    LaunchMainApp { link: String },
    /// The host handed us an invalid widget id; close without a result.
    Cancelled,
}

/// Parses the `available_activities` list.
///
/// Entries without an id are dropped. A list that can't be read is empty.
pub fn parse_available_activities(raw: Option<&str>) -> Vec<AvailableActivity> {
    let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
        return Vec::new();
    };

    let items = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => items,
        Ok(_) => {
            tracing::warn!("Available activities is not a JSON array");
            return Vec::new();
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to parse available activities");
            return Vec::new();
        }
    };

    items
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|object| {
            let id = text_field(object, "id").filter(|id| !id.is_empty())?;
            Some(AvailableActivity {
                id,
                name: text_field(object, "name")
                    .unwrap_or_else(|| UNKNOWN_ACTIVITY_NAME.to_string()),
                emoji: text_field(object, "emoji").filter(|e| !e.is_empty()),
            })
        })
        .collect()
}

/// Items for the picker: every activity, or the single fallback entry.
pub fn configuration_items(activities: &[AvailableActivity]) -> Vec<ConfigurationItem> {
    if activities.is_empty() {
        return vec![ConfigurationItem::OpenAppFirst {
            label: OPEN_APP_FIRST_LABEL.to_string(),
        }];
    }

    activities
        .iter()
        .cloned()
        .map(|activity| ConfigurationItem::Activity { activity })
        .collect()
}

/// What picking `item` does for `widget_id`. Nothing is written here.
pub fn choose(widget_id: i32, item: &ConfigurationItem) -> ConfigurationOutcome {
    if widget_id == INVALID_WIDGET_ID {
        return ConfigurationOutcome::Cancelled;
    }

    match item {
        ConfigurationItem::Activity { activity } => ConfigurationOutcome::Bound {
            binding: WidgetBinding {
                widget_id,
                activity_id: activity.id.clone(),
            },
        },
        ConfigurationItem::OpenAppFirst { .. } => ConfigurationOutcome::LaunchMainApp {
            link: open_url(""),
        },
    }
}
