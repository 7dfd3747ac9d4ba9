//! Pure mapping from a [`WidgetEntry`] to the view description hosts draw.
//!
//! Layout, fonts and spacing belong to the host (RemoteViews, SwiftUI). This
//! module decides only *what* is shown: strings, colors, and tap targets.

use serde::Serialize;

use crate::gradient::{cell_color, gradient_color, Rgba};
use crate::links::{log_url, open_url};
use crate::snapshot::{ActivitySnapshot, WidgetEntry};
use crate::week::DAY_LABELS;

pub const NOT_CONFIGURED_TITLE: &str = "Select Activity";
pub const NOT_CONFIGURED_STATUS: &str = "Tap to configure";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, uniffi::Enum)]
#[serde(rename_all = "snake_case")]
pub enum ActionIcon {
    Check,
    Add,
}

#[derive(Debug, Clone, PartialEq, Serialize, uniffi::Record)]
pub struct HeatMapCell {
    pub day_label: String,
    pub value: f64,
    pub color: Rgba,
}

/// The quick-log tap target, scoped to one widget instance and activity.
#[derive(Debug, Clone, PartialEq, Serialize, uniffi::Record)]
pub struct QuickLogAction {
    pub widget_id: i32,
    pub habit_id: String,
    pub icon: ActionIcon,
    /// Deep link for hosts that hand the log off to the main app.
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, uniffi::Record)]
pub struct ActivityView {
    /// Emoji and name, e.g. "💧 Water".
    pub header: String,
    pub name: String,
    pub emoji: Option<String>,
    pub status: String,
    /// Present only for a positive streak.
    pub streak: Option<u32>,
    pub accent: Rgba,
    pub cells: Vec<HeatMapCell>,
    pub action: QuickLogAction,
    pub open_link: String,
    pub is_placeholder: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, uniffi::Enum)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WidgetView {
    NotConfigured {
        title: String,
        status: String,
        icon: ActionIcon,
        open_link: String,
    },
    Activity {
        view: ActivityView,
    },
}

/// Renders the view for one widget instance.
pub fn render(entry: &WidgetEntry, widget_id: i32) -> WidgetView {
    match entry {
        WidgetEntry::NotConfigured => WidgetView::NotConfigured {
            title: NOT_CONFIGURED_TITLE.to_string(),
            status: NOT_CONFIGURED_STATUS.to_string(),
            icon: ActionIcon::Add,
            open_link: open_url(""),
        },
        WidgetEntry::Placeholder { snapshot } => WidgetView::Activity {
            view: activity_view(snapshot, widget_id, true),
        },
        WidgetEntry::Activity { snapshot } => WidgetView::Activity {
            view: activity_view(snapshot, widget_id, false),
        },
    }
}

/// "Done today" / "Not yet" for completions; "<n> <unit>" or "<n> today" for counts.
pub fn status_text(snapshot: &ActivitySnapshot) -> String {
    if snapshot.is_completion {
        return if snapshot.today_value > 0.0 {
            "Done today".to_string()
        } else {
            "Not yet".to_string()
        };
    }

    let value = snapshot.today_value.trunc() as i64;
    match snapshot.unit.as_deref() {
        Some(unit) if !unit.is_empty() => format!("{} {}", value, unit),
        _ => format!("{} today", value),
    }
}

fn activity_view(
    snapshot: &ActivitySnapshot,
    widget_id: i32,
    is_placeholder: bool,
) -> ActivityView {
    let header = match &snapshot.emoji {
        Some(emoji) => format!("{} {}", emoji, snapshot.name),
        None => snapshot.name.clone(),
    };

    let cells = snapshot
        .week()
        .iter()
        .zip(DAY_LABELS)
        .map(|(&value, label)| HeatMapCell {
            day_label: label.to_string(),
            value,
            color: cell_color(&snapshot.gradient_id, value),
        })
        .collect();

    ActivityView {
        header,
        name: snapshot.name.clone(),
        emoji: snapshot.emoji.clone(),
        status: status_text(snapshot),
        streak: (snapshot.current_streak > 0).then_some(snapshot.current_streak),
        accent: gradient_color(&snapshot.gradient_id),
        cells,
        action: QuickLogAction {
            widget_id,
            habit_id: snapshot.id.clone(),
            icon: if snapshot.is_completion {
                ActionIcon::Check
            } else {
                ActionIcon::Add
            },
            link: log_url(&snapshot.id),
        },
        open_link: open_url(&snapshot.id),
        is_placeholder,
    }
}

#[uniffi::export]
pub fn render_entry(entry: WidgetEntry, widget_id: i32) -> WidgetView {
    render(&entry, widget_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gradient::EMPTY_CELL_COLOR;

    fn count_snapshot(today: f64, unit: Option<&str>) -> ActivitySnapshot {
        ActivitySnapshot {
            id: "water".to_string(),
            name: "Water".to_string(),
            emoji: Some("💧".to_string()),
            is_completion: false,
            unit: unit.map(str::to_string),
            today_value: today,
            current_streak: 0,
            week_values: vec![0.0, 2.0, 0.0, 0.0, 0.0, 0.0, today],
            gradient_id: "ocean".to_string(),
        }
    }

    fn activity(view: WidgetView) -> ActivityView {
        match view {
            WidgetView::Activity { view } => view,
            other => panic!("expected activity view, got {:?}", other),
        }
    }

    #[test]
    fn test_not_configured_view() {
        let view = render(&WidgetEntry::NotConfigured, 7);
        assert_eq!(
            view,
            WidgetView::NotConfigured {
                title: "Select Activity".to_string(),
                status: "Tap to configure".to_string(),
                icon: ActionIcon::Add,
                open_link: "ember://open?habitId=".to_string(),
            }
        );
    }

    #[test]
    fn test_count_status_text() {
        assert_eq!(status_text(&count_snapshot(0.0, None)), "0 today");
        assert_eq!(status_text(&count_snapshot(3.0, Some("glasses"))), "3 glasses");
        assert_eq!(status_text(&count_snapshot(2.9, Some(""))), "2 today");
    }

    #[test]
    fn test_completion_status_text() {
        let mut snapshot = count_snapshot(0.0, None);
        snapshot.is_completion = true;
        assert_eq!(status_text(&snapshot), "Not yet");
        snapshot.today_value = 1.0;
        assert_eq!(status_text(&snapshot), "Done today");
    }

    #[test]
    fn test_decoded_null_today_renders_zero() {
        let snapshot = ActivitySnapshot::decode(Some(r#"{"id":"a","todayValue":null}"#), "a")
            .expect("snapshot");
        assert_eq!(status_text(&snapshot), "0 today");
    }

    #[test]
    fn test_streak_badge_only_when_positive() {
        let mut snapshot = count_snapshot(1.0, None);
        let entry = WidgetEntry::Activity {
            snapshot: snapshot.clone(),
        };
        assert_eq!(activity(render(&entry, 1)).streak, None);

        snapshot.current_streak = 6;
        let entry = WidgetEntry::Activity { snapshot };
        assert_eq!(activity(render(&entry, 1)).streak, Some(6));
    }

    #[test]
    fn test_cells_follow_week_values() {
        let entry = WidgetEntry::Activity {
            snapshot: count_snapshot(4.0, None),
        };
        let view = activity(render(&entry, 1));
        let labels: Vec<_> = view.cells.iter().map(|c| c.day_label.as_str()).collect();
        assert_eq!(labels, ["M", "T", "W", "T", "F", "S", "S"]);
        assert_eq!(view.cells[0].color, EMPTY_CELL_COLOR);
        assert_eq!(view.cells[1].color.to_hex(), "#CC4D96FF");
        assert_eq!(view.cells[6].value, 4.0);
    }

    #[test]
    fn test_action_is_scoped_to_widget_and_activity() {
        let entry = WidgetEntry::Activity {
            snapshot: count_snapshot(0.0, None),
        };
        let view = activity(render(&entry, 42));
        assert_eq!(view.action.widget_id, 42);
        assert_eq!(view.action.habit_id, "water");
        assert_eq!(view.action.icon, ActionIcon::Add);
        assert_eq!(view.action.link, "ember://log?habitId=water");
        assert_eq!(view.open_link, "ember://open?habitId=water");
        assert_eq!(view.header, "💧 Water");
    }

    #[test]
    fn test_completion_uses_check_icon() {
        let mut snapshot = count_snapshot(0.0, None);
        snapshot.is_completion = true;
        snapshot.emoji = None;
        let view = activity(render(&WidgetEntry::Activity { snapshot }, 1));
        assert_eq!(view.action.icon, ActionIcon::Check);
        assert_eq!(view.header, "Water");
    }

    #[test]
    fn test_unknown_gradient_renders_ember() {
        let mut snapshot = count_snapshot(1.0, None);
        snapshot.gradient_id = "midnight".to_string();
        let view = activity(render(&WidgetEntry::Activity { snapshot }, 1));
        assert_eq!(view.accent.to_hex(), "#FF6B1A");
    }

    #[test]
    fn test_placeholder_is_flagged() {
        let entry = WidgetEntry::Placeholder {
            snapshot: ActivitySnapshot::placeholder(),
        };
        let view = activity(render(&entry, 0));
        assert!(view.is_placeholder);
        assert_eq!(view.status, "8 glasses");
        assert_eq!(view.streak, Some(5));
    }
}
