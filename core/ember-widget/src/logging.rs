//! Logging setup for the widget host.
//!
//! Logs go to stderr so stdout stays clean for view output.

use std::env;

use tracing_subscriber::EnvFilter;

pub const DEBUG_ENV_VAR: &str = "EMBER_DEBUG_LOG";

pub fn init() {
    let debug_enabled = env::var(DEBUG_ENV_VAR)
        .map(|value| matches!(value.as_str(), "1" | "true" | "TRUE" | "yes" | "YES"))
        .unwrap_or(false);
    let filter = if debug_enabled {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
