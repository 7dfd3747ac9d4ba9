//! End-to-end widget flows against a file-backed store seeded from fixtures.

use chrono::{DateTime, TimeZone, Utc};
use ember_core::pending::decode_entries;
use ember_core::store::keys;
use ember_core::{
    ConfigurationItem, ConfigurationOutcome, FileStore, SharedStore, StreakPolicy, WidgetEngine,
    WidgetSettings, WidgetView,
};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/stores")
        .join(name)
}

/// Copies a fixture store into a temp dir so tests can mutate it.
fn seeded_store(dir: &TempDir, fixture: &str) -> PathBuf {
    let path = dir.path().join("group.json");
    std::fs::copy(fixture_path(fixture), &path).unwrap();
    path
}

fn engine(path: &Path, policy: StreakPolicy) -> WidgetEngine {
    let settings = WidgetSettings {
        streak_policy: policy,
        ..WidgetSettings::default()
    };
    WidgetEngine::with_store(FileStore::new(path), settings)
}

fn wednesday() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 21, 12, 0, 0).unwrap()
}

fn sunday() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 25, 12, 0, 0).unwrap()
}

fn status(view: &WidgetView) -> &str {
    match view {
        WidgetView::NotConfigured { status, .. } => status.as_str(),
        WidgetView::Activity { view } => view.status.as_str(),
    }
}

#[test]
fn test_renders_plugin_written_snapshots() {
    let dir = TempDir::new().unwrap();
    let path = seeded_store(&dir, "plugin-written.json");
    let engine = engine(&path, StreakPolicy::Untouched);

    let water = engine.render_widget(7);
    let WidgetView::Activity { view } = &water else {
        panic!("expected activity view, got {:?}", water);
    };
    assert_eq!(view.header, "💧 Water");
    assert_eq!(view.status, "3 glasses");
    assert_eq!(view.streak, Some(5));
    assert_eq!(view.accent.to_hex(), "#4D96FF");

    let meditate = engine.render_widget(8);
    let WidgetView::Activity { view } = &meditate else {
        panic!("expected activity view, got {:?}", meditate);
    };
    assert_eq!(view.header, "Meditate");
    assert_eq!(view.status, "Not yet");
    assert_eq!(view.streak, Some(2));
    assert_eq!(view.accent.to_hex(), "#FF6B1A");
    assert_eq!(view.cells.len(), 7);

    assert_eq!(status(&engine.render_widget(99)), "Tap to configure");
}

#[test]
fn test_completion_toggles_on_and_off() {
    let dir = TempDir::new().unwrap();
    let path = seeded_store(&dir, "plugin-written.json");
    let engine = engine(&path, StreakPolicy::Untouched);

    let values: Vec<f64> = (0..2)
        .map(|_| {
            engine
                .quick_log_at(Some(8), "meditate", &wednesday())
                .unwrap()
                .new_value
                .unwrap()
        })
        .collect();
    assert_eq!(values, vec![1.0, 0.0]);

    let snapshot = engine.entry_for_widget(8).snapshot().cloned().unwrap();
    assert_eq!(snapshot.today_value, 0.0);
    assert_eq!(snapshot.week_values[2], snapshot.today_value);
    assert_eq!(snapshot.current_streak, 2);
}

#[test]
fn test_count_increments_only_today() {
    let dir = TempDir::new().unwrap();
    let path = seeded_store(&dir, "plugin-written.json");
    let engine = engine(&path, StreakPolicy::Untouched);

    let before = engine.entry_for_widget(7).snapshot().cloned().unwrap();
    for _ in 0..3 {
        engine.quick_log_at(Some(7), "water", &sunday()).unwrap();
    }
    let after = engine.entry_for_widget(7).snapshot().cloned().unwrap();

    assert_eq!(after.today_value, 6.0);
    assert_eq!(after.week_values[6], 6.0);
    assert_eq!(&after.week_values[..6], &before.week_values[..6]);
}

#[test]
fn test_corrupt_queue_replaced_by_single_entry() {
    let dir = TempDir::new().unwrap();
    let path = seeded_store(&dir, "plugin-written.json");
    let engine = engine(&path, StreakPolicy::Untouched);

    engine.quick_log_at(Some(7), "water", &wednesday()).unwrap();

    let store = FileStore::new(&path);
    let raw = store.get(keys::PENDING_LOGS).unwrap();
    let entries = decode_entries(raw.as_deref());
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].habit_id, "water");
    assert_eq!(entries[0].value, 4.0);
}

#[test]
fn test_maintain_policy_differs_from_untouched() {
    let dir = TempDir::new().unwrap();
    let path = seeded_store(&dir, "plugin-written.json");

    let untouched = engine(&path, StreakPolicy::Untouched);
    let report = untouched.quick_log_at(Some(8), "meditate", &wednesday()).unwrap();
    assert_eq!(report.current_streak, Some(2));
    untouched.quick_log_at(Some(8), "meditate", &wednesday()).unwrap();

    let maintain = engine(&path, StreakPolicy::Maintain);
    let report = maintain.quick_log_at(Some(8), "meditate", &wednesday()).unwrap();
    assert_eq!(report.current_streak, Some(3));
}

#[test]
fn test_configuration_binds_selected_activity() {
    let dir = TempDir::new().unwrap();
    let path = seeded_store(&dir, "plugin-written.json");
    let engine = engine(&path, StreakPolicy::Untouched);

    let items = engine.configuration_items();
    assert_eq!(items.len(), 2);

    let outcome = engine.select_item(21, items[1].clone()).unwrap();
    assert!(matches!(outcome, ConfigurationOutcome::Bound { .. }));
    assert_eq!(status(&engine.render_widget(21)), "Not yet");

    engine.remove_widget(21).unwrap();
    assert_eq!(status(&engine.render_widget(21)), "Tap to configure");
}

#[test]
fn test_empty_activity_list_offers_fallback_only() {
    let dir = TempDir::new().unwrap();
    let path = seeded_store(&dir, "empty-app.json");
    let engine = engine(&path, StreakPolicy::Untouched);

    let items = engine.configuration_items();
    assert_eq!(items.len(), 1);
    assert!(matches!(items[0], ConfigurationItem::OpenAppFirst { .. }));

    let outcome = engine.select_item(21, items[0].clone()).unwrap();
    assert!(matches!(outcome, ConfigurationOutcome::LaunchMainApp { .. }));
    assert_eq!(engine.bound_activity(21), None);
    assert_eq!(FileStore::new(&path).get(&keys::widget_binding(21)).unwrap(), None);
}

#[test]
fn test_missing_store_renders_not_configured() {
    let dir = TempDir::new().unwrap();
    let engine = engine(&dir.path().join("absent.json"), StreakPolicy::Untouched);

    assert_eq!(status(&engine.render_widget(1)), "Tap to configure");
    let report = engine.quick_log_at(Some(1), "water", &wednesday()).unwrap();
    assert!(!report.logged);
    assert!(!dir.path().join("absent.json").exists());
}
