//! The pending-log queue under `pending_widget_logs`.
//!
//! The widget appends, the main app drains on its next foreground sync.
//! A corrupt queue is read as empty so the next append starts a fresh one.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{EmberError, Result};

/// A quick-log the main app has not reconciled yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct PendingLogEntry {
    pub habit_id: String,
    pub value: f64,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

/// Parses the raw queue into JSON items, or an empty queue if unreadable.
///
/// Items are kept as raw values so entries written by other producers survive
/// a widget append unchanged.
pub fn read_queue(raw: Option<&str>) -> Vec<Value> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => items,
        Ok(_) => {
            tracing::warn!("Pending log queue is not a JSON array, starting a new queue");
            Vec::new()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Pending log queue is corrupt, starting a new queue");
            Vec::new()
        }
    }
}

/// Appends `entry` to the raw queue and returns the new queue text.
pub fn append_entry(raw: Option<&str>, entry: &PendingLogEntry) -> Result<String> {
    let mut items = read_queue(raw);
    let item = serde_json::to_value(entry)
        .map_err(|e| EmberError::json("encoding pending log entry", e))?;
    items.push(item);
    Ok(Value::Array(items).to_string())
}

/// Typed entries of the queue. Items that don't look like entries are skipped.
pub fn decode_entries(raw: Option<&str>) -> Vec<PendingLogEntry> {
    read_queue(raw)
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<PendingLogEntry>(item) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!(error = %e, "Skipping unreadable pending log entry");
                None
            }
        })
        .collect()
}
