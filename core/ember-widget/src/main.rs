//! ember-widget: command-line widget host for Ember.
//!
//! Plays the role the Android receiver and iOS extension play on device,
//! against a file-backed copy of the shared store. Useful for inspecting what a
//! widget would show and for exercising quick-logs without a phone.
//!
//! ## Subcommands
//!
//! - `render`: view description for one widget instance
//! - `quick-log`: the quick-log tap
//! - `configure` / `select`: the configuration screen and its choice
//! - `remove`: widget instance deleted by the host
//! - `pending`: inspect (or drain) the pending-log queue
//! - `link`: open an `ember://` deep link

mod commands;
mod logging;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use ember_core::StreakPolicy;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ember-widget")]
#[command(about = "Ember home-screen widget host")]
#[command(version)]
struct Cli {
    /// Directory holding widget.json and the store file (default: ~/.ember)
    #[arg(long, global = true, value_name = "DIR")]
    store_root: Option<PathBuf>,

    /// Override the streak policy from widget.json
    #[arg(long, global = true, value_enum)]
    streak_policy: Option<PolicyArg>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = Format::Text)]
    format: Format,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    Untouched,
    Maintain,
}

impl From<PolicyArg> for StreakPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Untouched => StreakPolicy::Untouched,
            PolicyArg::Maintain => StreakPolicy::Maintain,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a widget instance
    Render {
        #[arg(long)]
        widget_id: i32,

        /// Render the gallery placeholder instead
        #[arg(long)]
        placeholder: bool,
    },

    /// Quick-log an activity from a widget instance
    QuickLog {
        #[arg(long)]
        widget_id: i32,

        #[arg(long)]
        habit_id: String,
    },

    /// List configuration choices for a widget instance
    Configure,

    /// Bind a widget instance to an activity
    Select {
        #[arg(long)]
        widget_id: i32,

        /// Activity id to bind
        #[arg(long, conflicts_with = "fallback", required_unless_present = "fallback")]
        activity_id: Option<String>,

        /// Pick the "open the app first" entry
        #[arg(long)]
        fallback: bool,
    },

    /// Remove a widget instance's binding
    Remove {
        #[arg(long)]
        widget_id: i32,
    },

    /// Show the pending-log queue
    Pending {
        /// Clear the queue after printing it (what the main app does on sync)
        #[arg(long)]
        drain: bool,
    },

    /// Open an ember:// deep link
    Link {
        #[arg(value_name = "URL")]
        url: String,
    },
}

fn main() {
    logging::init();
    let cli = Cli::parse();

    let context = commands::Context::new(
        cli.store_root,
        cli.streak_policy.map(StreakPolicy::from),
        cli.format,
    );

    let result = match cli.command {
        Commands::Render {
            widget_id,
            placeholder,
        } => commands::render(&context, widget_id, placeholder),
        Commands::QuickLog {
            widget_id,
            habit_id,
        } => commands::quick_log(&context, widget_id, habit_id),
        Commands::Configure => commands::configure(&context),
        Commands::Select {
            widget_id,
            activity_id,
            fallback: _,
        } => commands::select(&context, widget_id, activity_id),
        Commands::Remove { widget_id } => commands::remove(&context, widget_id),
        Commands::Pending { drain } => commands::pending(&context, drain),
        Commands::Link { url } => commands::link(&context, &url),
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "ember-widget failed");
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
