//! # ember-core
//!
//! Shared core for Ember's home-screen widgets (Android AppWidget, iOS
//! WidgetKit, and the `ember-widget` command-line host).
//!
//! ## Design Principles
//!
//! - **Synchronous**: No async runtime dependency. Each host event is one short call.
//! - **Never fails the host**: Missing or malformed data renders as "not configured".
//! - **Pure at the center**: [`render`] and [`apply_quick_log`] are plain functions;
//!   the engine only adds store access around them.
//! - **Weakly consistent store**: The shared store has no locking or transactions,
//!   and this crate doesn't pretend otherwise. Last writer wins.
//! - **FFI-ready**: UniFFI annotations enable Swift and Kotlin bindings.
//!   Prefer additive public API changes; removing or renaming breaks widget extensions.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ember_core::WidgetEngine;
//!
//! let engine = WidgetEngine::new();
//! let view = engine.render_widget(widget_id);
//! let report = engine.quick_log(widget_id, habit_id)?;
//! ```

// UniFFI scaffolding for Swift/Kotlin bindings
uniffi::setup_scaffolding!();

pub mod configure;
pub mod engine;
pub mod error;
pub mod gradient;
pub mod links;
pub mod pending;
pub mod quick_log;
pub mod render;
pub mod settings;
pub mod snapshot;
pub mod storage;
pub mod store;
pub mod week;

pub use configure::{
    AvailableActivity, ConfigurationItem, ConfigurationOutcome, WidgetBinding, INVALID_WIDGET_ID,
};
pub use engine::{DeepLinkOutcome, QuickLogReport, WidgetEngine};
pub use error::{EmberError, EmberFfiError, Result};
pub use gradient::{gradient_color, Rgba};
pub use links::DeepLink;
pub use pending::PendingLogEntry;
pub use quick_log::{apply_quick_log, QuickLogResult, StreakPolicy};
pub use render::{render, ActionIcon, ActivityView, HeatMapCell, QuickLogAction, WidgetView};
pub use settings::WidgetSettings;
pub use snapshot::{ActivitySnapshot, WidgetEntry};
pub use storage::StorageConfig;
pub use store::{FileStore, HostKeyValueStore, MemoryStore, SharedStore};
