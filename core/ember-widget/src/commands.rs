//! Subcommand handlers. Each one is a single engine call plus output.

use std::path::PathBuf;

use ember_core::settings::load_settings;
use ember_core::{
    ConfigurationItem, EmberFfiError, FileStore, QuickLogReport, StorageConfig, StreakPolicy,
    WidgetEngine, WidgetView,
};
use serde::Serialize;

use crate::output;
use crate::Format;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Engine(#[from] EmberFfiError),

    #[error("Failed to encode output: {0}")]
    Output(#[from] serde_json::Error),

    #[error("Activities are available; choose one with --activity-id")]
    FallbackUnavailable,
}

pub struct Context {
    engine: WidgetEngine,
    format: Format,
}

impl Context {
    pub fn new(
        store_root: Option<PathBuf>,
        streak_policy: Option<StreakPolicy>,
        format: Format,
    ) -> Self {
        let storage = store_root
            .map(StorageConfig::with_root)
            .unwrap_or_default();

        let mut settings = load_settings(&storage);
        if let Some(policy) = streak_policy {
            settings.streak_policy = policy;
        }

        let store = FileStore::new(storage.store_file(&settings.app_group));
        tracing::debug!(
            path = %store.path().display(),
            policy = settings.streak_policy.as_str(),
            "Opening widget store"
        );

        Context {
            engine: WidgetEngine::with_store(store, settings),
            format,
        }
    }

    fn emit<T: Serialize>(&self, value: &T, text: impl FnOnce() -> String) -> Result<(), CliError> {
        match self.format {
            Format::Json => println!("{}", serde_json::to_string_pretty(value)?),
            Format::Text => println!("{}", text()),
        }
        Ok(())
    }
}

pub fn render(ctx: &Context, widget_id: i32, placeholder: bool) -> Result<(), CliError> {
    let view = if placeholder {
        ctx.engine.placeholder_view()
    } else {
        ctx.engine.render_widget(widget_id)
    };
    ctx.emit(&view, || output::widget_view(&view))
}

/// A quick-log report together with the redrawn widget, printed as one document.
#[derive(Debug, Serialize)]
pub struct QuickLogOutput {
    pub report: QuickLogReport,
    pub view: Option<WidgetView>,
}

fn apply_quick_log(
    engine: &WidgetEngine,
    widget_id: i32,
    habit_id: String,
) -> Result<QuickLogOutput, CliError> {
    let report = engine.quick_log(widget_id, habit_id)?;
    let view = report.redraw_widget_id.map(|redraw| engine.render_widget(redraw));
    Ok(QuickLogOutput { report, view })
}

pub fn quick_log(ctx: &Context, widget_id: i32, habit_id: String) -> Result<(), CliError> {
    let result = apply_quick_log(&ctx.engine, widget_id, habit_id)?;
    ctx.emit(&result, || {
        let mut text = output::quick_log_report(&result.report);
        if let Some(view) = &result.view {
            text.push_str("\n\n");
            text.push_str(&output::widget_view(view));
        }
        text
    })
}

pub fn configure(ctx: &Context) -> Result<(), CliError> {
    let items = ctx.engine.configuration_items();
    ctx.emit(&items, || output::configuration_items(&items))
}

pub fn select(
    ctx: &Context,
    widget_id: i32,
    activity_id: Option<String>,
) -> Result<(), CliError> {
    let outcome = match activity_id {
        Some(activity_id) => ctx.engine.select_activity(widget_id, activity_id)?,
        None => {
            let item = ctx
                .engine
                .configuration_items()
                .into_iter()
                .find(|item| matches!(item, ConfigurationItem::OpenAppFirst { .. }))
                .ok_or(CliError::FallbackUnavailable)?;
            ctx.engine.select_item(widget_id, item)?
        }
    };
    ctx.emit(&outcome, || output::configuration_outcome(&outcome))
}

pub fn remove(ctx: &Context, widget_id: i32) -> Result<(), CliError> {
    ctx.engine.remove_widget(widget_id)?;
    ctx.emit(&serde_json::json!({ "removed": widget_id }), || {
        format!("Removed binding for widget {}", widget_id)
    })
}

pub fn pending(ctx: &Context, drain: bool) -> Result<(), CliError> {
    let entries = if drain {
        ctx.engine.take_pending_logs()?
    } else {
        ctx.engine.pending_logs()
    };
    ctx.emit(&entries, || output::pending_logs(&entries))
}

pub fn link(ctx: &Context, url: &str) -> Result<(), CliError> {
    let outcome = ctx.engine.open_deep_link(url.to_string())?;
    ctx.emit(&outcome, || output::deep_link_outcome(&outcome))
}
