//! Remote task/session store boundary.
//!
//! The core consumes this as a request/response interface and assumes no
//! contract beyond success/failure. Delivery is at-least-once: a failed
//! submission leaves the working session untouched for a later retry.

mod api;

pub use api::ApiClient;

use std::future::Future;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RemoteError;
use crate::session::SessionRecord;

/// A task as served by GET /tasks. Read-only input; never mutated by the
/// timer core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub name: String,
}

/// Body of POST /focus-sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusSessionPayload {
    pub task_id: String,
    /// Total recorded focus time in milliseconds: the sum of Focus ledger
    /// records. Break overtime is never included.
    pub duration: u64,
    /// When the working session started (first focus start).
    pub date: DateTime<Utc>,
    pub records: Vec<SessionRecord>,
}

/// A finalized session as returned by GET /focus-sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteSession {
    pub id: String,
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub task_name: Option<String>,
    pub duration: u64,
    pub date: DateTime<Utc>,
}

/// The submission seam consumed by the finalizer. `ApiClient` is the
/// production implementation; tests substitute their own.
pub trait RemoteStore {
    fn submit_session(
        &self,
        payload: &FocusSessionPayload,
    ) -> impl Future<Output = Result<(), RemoteError>> + Send;
}
