//! Key names shared with the main app. Changing any of these breaks the
//! contract with the app's widget plugin.

pub const AVAILABLE_ACTIVITIES: &str = "available_activities";
pub const PENDING_LOGS: &str = "pending_widget_logs";

pub fn activity(activity_id: &str) -> String {
    format!("activity_{}", activity_id)
}

pub fn widget_binding(widget_id: i32) -> String {
    format!("widget_{}_activity_id", widget_id)
}
