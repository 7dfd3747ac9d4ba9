//! Activity snapshots as stored under `activity_<id>`.
//!
//! The same key is written by the main app (through a cross-platform plugin)
//! and by the widget itself, so the JSON is loosely typed in practice:
//!
//! - numbers arrive as either integer or float encodings
//! - absent values may be JSON `null` or the literal string `"null"`
//! - arrays may be short, long, or contain non-numeric items
//!
//! Decoding never fails. Each field falls back to a fixed default and a
//! snapshot that cannot be read at all becomes [`WidgetEntry::NotConfigured`].

use serde::Serialize;
use serde_json::{Map, Value};

use crate::gradient::DEFAULT_GRADIENT_ID;
use crate::week::{normalize_week, DAYS_IN_WEEK};

pub const DEFAULT_ACTIVITY_NAME: &str = "Activity";

/// One tracked activity's current-day and weekly state.
#[derive(Debug, Clone, PartialEq, Serialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySnapshot {
    pub id: String,
    pub name: String,
    pub emoji: Option<String>,
    pub is_completion: bool,
    pub unit: Option<String>,
    pub today_value: f64,
    pub current_streak: u32,
    /// Always seven entries, Monday first.
    pub week_values: Vec<f64>,
    pub gradient_id: String,
}

/// What a widget instance should show.
#[derive(Debug, Clone, PartialEq, uniffi::Enum)]
pub enum WidgetEntry {
    /// No binding, no snapshot, or a snapshot that could not be parsed.
    NotConfigured,
    /// Sample data for the host's widget gallery.
    Placeholder { snapshot: ActivitySnapshot },
    Activity { snapshot: ActivitySnapshot },
}

impl WidgetEntry {
    pub fn snapshot(&self) -> Option<&ActivitySnapshot> {
        match self {
            WidgetEntry::NotConfigured => None,
            WidgetEntry::Placeholder { snapshot } | WidgetEntry::Activity { snapshot } => {
                Some(snapshot)
            }
        }
    }
}

impl ActivitySnapshot {
    /// Parses raw snapshot text stored under `activity_<key_id>`.
    ///
    /// The key is authoritative: an `id` embedded in the JSON is ignored, so
    /// tap targets always address the key the snapshot was read from.
    pub fn decode(raw: Option<&str>, key_id: &str) -> Option<Self> {
        let object = parse_object(raw?)?;
        Some(Self::from_object(&object, key_id))
    }

    /// Builds a snapshot from an already-parsed JSON object.
    pub fn from_object(object: &Map<String, Value>, key_id: &str) -> Self {
        let embedded = text_field(object, "id").filter(|id| !id.is_empty() && id != key_id);
        if let Some(embedded) = embedded {
            tracing::debug!(key_id, embedded = %embedded, "Snapshot id differs from its key");
        }

        ActivitySnapshot {
            id: key_id.to_string(),
            name: text_field(object, "name").unwrap_or_else(|| DEFAULT_ACTIVITY_NAME.to_string()),
            emoji: text_field(object, "emoji").filter(|e| !e.is_empty()),
            is_completion: object
                .get("isCompletion")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            unit: text_field(object, "unit").filter(|u| !u.is_empty()),
            today_value: number_field(object, "todayValue"),
            current_streak: streak_field(object),
            week_values: week_field(object).to_vec(),
            gradient_id: text_field(object, "gradientId")
                .unwrap_or_else(|| DEFAULT_GRADIENT_ID.to_string()),
        }
    }

    /// Writes `todayValue` and `weekValues` back into `object`, leaving every
    /// other key untouched.
    pub fn write_day_fields(&self, object: &mut Map<String, Value>) {
        object.insert("todayValue".to_string(), Value::from(self.today_value));
        object.insert(
            "weekValues".to_string(),
            Value::Array(self.week().iter().copied().map(Value::from).collect()),
        );
    }

    pub fn write_streak(&self, object: &mut Map<String, Value>) {
        object.insert("currentStreak".to_string(), Value::from(self.current_streak));
    }

    /// Seven week values regardless of how the snapshot was constructed.
    pub fn week(&self) -> [f64; DAYS_IN_WEEK] {
        normalize_week(&self.week_values)
    }

    /// Sample shown in the widget gallery before the user picks an activity.
    pub fn placeholder() -> Self {
        ActivitySnapshot {
            id: String::new(),
            name: "Water".to_string(),
            emoji: Some("\u{1F4A7}".to_string()),
            is_completion: false,
            unit: Some("glasses".to_string()),
            today_value: 8.0,
            current_streak: 5,
            week_values: vec![1.0, 1.0, 1.0, 0.0, 1.0, 1.0, 0.0],
            gradient_id: "ocean".to_string(),
        }
    }
}

/// Parses text as a JSON object, or `None` for anything else.
pub(crate) fn parse_object(raw: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(object)) => Some(object),
        Ok(other) => {
            tracing::warn!(kind = json_kind(&other), "Snapshot is not a JSON object");
            None
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to parse snapshot JSON");
            None
        }
    }
}

/// A string value, treating JSON `null` and the string `"null"` as absent.
pub(crate) fn text_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    match object.get(key) {
        Some(Value::String(s)) if s != "null" => Some(s.clone()),
        _ => None,
    }
}

fn number_field(object: &Map<String, Value>, key: &str) -> f64 {
    object
        .get(key)
        .and_then(Value::as_f64)
        .map(non_negative)
        .unwrap_or(0.0)
}

fn streak_field(object: &Map<String, Value>) -> u32 {
    let Some(value) = object.get("currentStreak") else {
        return 0;
    };
    let streak = value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f.trunc() as i64))
        .unwrap_or(0);
    streak.clamp(0, u32::MAX as i64) as u32
}

fn week_field(object: &Map<String, Value>) -> [f64; DAYS_IN_WEEK] {
    let values: Vec<f64> = object
        .get("weekValues")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|v| v.as_f64().map(non_negative).unwrap_or(0.0))
                .collect()
        })
        .unwrap_or_default();
    normalize_week(&values)
}

fn non_negative(value: f64) -> f64 {
    if value > 0.0 {
        value
    } else {
        0.0
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
