//! Error types for ember-core operations.
//! Keep EmberFfiError minimal and stable to avoid breaking widget extensions.
//!
//! Decoding problems are never errors here: malformed snapshots, queues and
//! activity lists degrade to defaults. Only store I/O, settings and deep link
//! parsing can fail.

use std::path::PathBuf;

// ═══════════════════════════════════════════════════════════════════════════════
// FFI-Compatible Error (for Swift/Kotlin)
// ═══════════════════════════════════════════════════════════════════════════════

/// FFI-safe error type for use across language boundaries.
#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum EmberFfiError {
    #[error("{message}")]
    General { message: String },
}

impl From<String> for EmberFfiError {
    fn from(message: String) -> Self {
        EmberFfiError::General { message }
    }
}

impl From<&str> for EmberFfiError {
    fn from(message: &str) -> Self {
        EmberFfiError::General {
            message: message.to_string(),
        }
    }
}

impl From<EmberError> for EmberFfiError {
    fn from(err: EmberError) -> Self {
        EmberFfiError::General {
            message: err.to_string(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Internal Error (for Rust-only use)
// ═══════════════════════════════════════════════════════════════════════════════

/// All errors that can occur in ember-core operations.
///
/// For FFI boundaries, use `EmberFfiError` instead.
#[derive(Debug, thiserror::Error)]
pub enum EmberError {
    // ─────────────────────────────────────────────────────────────────────
    // Store Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("I/O error: {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON encoding error: {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Store path has no parent directory: {0}")]
    InvalidStorePath(PathBuf),

    // ─────────────────────────────────────────────────────────────────────
    // Settings Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Settings file malformed: {path}: {details}")]
    SettingsMalformed { path: PathBuf, details: String },

    #[error("Unknown streak policy: {0}")]
    UnknownStreakPolicy(String),

    // ─────────────────────────────────────────────────────────────────────
    // Deep Link Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Invalid deep link: {url}: {reason}")]
    InvalidDeepLink { url: String, reason: String },
}

impl EmberError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        EmberError::Io {
            context: context.into(),
            source,
        }
    }

    pub(crate) fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        EmberError::Json {
            context: context.into(),
            source,
        }
    }
}

/// Convenience type alias for Results using EmberError.
pub type Result<T> = std::result::Result<T, EmberError>;

impl From<EmberError> for String {
    fn from(err: EmberError) -> String {
        err.to_string()
    }
}
