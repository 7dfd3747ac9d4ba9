//! Plain-text rendering of engine results for terminal use.

use chrono::{Local, TimeZone};
use ember_core::{
    ActionIcon, ConfigurationItem, ConfigurationOutcome, DeepLinkOutcome, PendingLogEntry,
    QuickLogReport, WidgetView,
};

const FILLED_CELL: &str = "■";
const EMPTY_CELL: &str = "□";

pub fn widget_view(view: &WidgetView) -> String {
    match view {
        WidgetView::NotConfigured { title, status, .. } => format!("{}\n{}", title, status),
        WidgetView::Activity { view } => {
            let mut lines = Vec::new();

            let header = if view.is_placeholder {
                format!("{} (preview)", view.header)
            } else {
                view.header.clone()
            };
            lines.push(header);

            match view.streak {
                Some(streak) => lines.push(format!("{}  🔥 {}", view.status, streak)),
                None => lines.push(view.status.clone()),
            }

            let cells: Vec<&str> = view
                .cells
                .iter()
                .map(|cell| if cell.value > 0.0 { FILLED_CELL } else { EMPTY_CELL })
                .collect();
            let labels: Vec<&str> = view.cells.iter().map(|c| c.day_label.as_str()).collect();
            lines.push(cells.join(" "));
            lines.push(labels.join(" "));

            let button = match view.action.icon {
                ActionIcon::Check => "✓",
                ActionIcon::Add => "+",
            };
            lines.push(format!("[{}] {}", button, view.action.link));
            lines.push(format!("accent {}", view.accent.to_hex()));

            lines.join("\n")
        }
    }
}

pub fn quick_log_report(report: &QuickLogReport) -> String {
    match (report.logged, report.previous_value, report.new_value) {
        (true, Some(previous), Some(new)) => format!(
            "Logged {}: {} -> {}",
            report.habit_id,
            format_value(previous),
            format_value(new)
        ),
        _ => format!("Nothing to log for {}", report.habit_id),
    }
}

pub fn configuration_items(items: &[ConfigurationItem]) -> String {
    items
        .iter()
        .map(|item| match item {
            ConfigurationItem::Activity { activity } => {
                format!("{:<24} {}", activity.id, activity.display_title())
            }
            ConfigurationItem::OpenAppFirst { label } => label.clone(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn configuration_outcome(outcome: &ConfigurationOutcome) -> String {
    match outcome {
        ConfigurationOutcome::Bound { binding } => format!(
            "Widget {} now shows {}",
            binding.widget_id, binding.activity_id
        ),
        ConfigurationOutcome::LaunchMainApp { link } => format!("Open the app: {}", link),
        ConfigurationOutcome::Cancelled => "Configuration cancelled".to_string(),
    }
}

pub fn pending_logs(entries: &[PendingLogEntry]) -> String {
    if entries.is_empty() {
        return "(no pending logs)".to_string();
    }
    entries
        .iter()
        .map(|entry| {
            let at = Local
                .timestamp_millis_opt(entry.timestamp)
                .single()
                .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| entry.timestamp.to_string());
            format!("{}  {:<24} {}", at, entry.habit_id, format_value(entry.value))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn deep_link_outcome(outcome: &DeepLinkOutcome) -> String {
    match outcome {
        DeepLinkOutcome::Open { habit_id: Some(id) } => format!("Open app on {}", id),
        DeepLinkOutcome::Open { habit_id: None } => "Open app".to_string(),
        DeepLinkOutcome::Logged { report } => quick_log_report(report),
    }
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
