//! Storage configuration and path management for file-backed widget hosts.
//!
//! Production code uses `StorageConfig::default()`, which points to
//! `~/.ember/` unless `EMBER_STORE_ROOT` is set. Tests use
//! `StorageConfig::with_root(temp_dir)` for isolation.
//!
//! Mobile hosts don't use these paths at all: their store is the platform's
//! app-group preferences, handed in through [`crate::store::HostStore`].

use std::path::{Path, PathBuf};

pub const ROOT_ENV_VAR: &str = "EMBER_STORE_ROOT";

#[derive(Debug, Clone)]
pub struct StorageConfig {
    root: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        if let Some(root) = std::env::var_os(ROOT_ENV_VAR).filter(|v| !v.is_empty()) {
            return Self::with_root(PathBuf::from(root));
        }
        let home = dirs::home_dir().unwrap_or_else(std::env::temp_dir);
        Self::with_root(home.join(".ember"))
    }
}

impl StorageConfig {
    pub fn with_root(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path to widget.json (host settings).
    pub fn settings_file(&self) -> PathBuf {
        self.root.join("widget.json")
    }

    /// Path to the shared store file for one app group.
    pub fn store_file(&self, app_group: &str) -> PathBuf {
        self.root.join(format!("{}.json", sanitize_file_name(app_group)))
    }
}

fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '.' | '-' | '_' => c,
            _ => '_',
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "default".to_string()
    } else {
        cleaned.to_string()
    }
}
