//! Error types for flowdoro-core.
//!
//! Nothing in the core is fatal: invalid transitions reject the call and
//! leave state unchanged, unreadable snapshots are treated as absent, and a
//! failed remote submission retains the session for a later retry.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for flowdoro-core.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Timer error: {0}")]
    Engine(#[from] EngineError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Remote error: {0}")]
    Remote(#[from] RemoteError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Custom(String),
}

/// Rejected timer operations. Never mutates state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The operation is not valid in the current state. Surfaced to the
    /// caller so a front end can disable unavailable actions.
    #[error("cannot {operation} while {state}")]
    InvalidTransition {
        state: &'static str,
        operation: &'static str,
    },
}

/// Durable-storage errors.
///
/// Read-side failures on the snapshot path are not represented here: a
/// missing or malformed snapshot is reported as absence by the gateway.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Query failed: {0}")]
    QueryFailed(#[from] rusqlite::Error),

    #[error("Failed to resolve data directory: {0}")]
    DataDir(String),

    #[error("Failed to serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Remote-store boundary errors.
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned {status} for {endpoint}")]
    Status { status: u16, endpoint: String },

    #[error("Invalid API base URL '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },
}

/// Session finalization errors. The working session and its snapshot are
/// left untouched on every failure path.
#[derive(Error, Debug)]
pub enum FinalizeError {
    #[error("no working session to finalize")]
    NoSession,

    #[error("cannot finalize while a resume decision is pending")]
    ResumePending,

    #[error("Submission failed: {0}")]
    Submission(#[from] RemoteError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
