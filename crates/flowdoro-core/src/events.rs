use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::SessionRecord;
use crate::timer::TimerState;

/// Every successful engine operation produces an Event.
/// The CLI prints them; the dispatch layer snapshots on them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    FocusStarted {
        task_id: String,
        /// Focus time already banked from a previous pause, if any.
        accumulated_ms: u64,
        at: DateTime<Utc>,
    },
    FocusPaused {
        elapsed_ms: u64,
        at: DateTime<Utc>,
    },
    /// Accumulated focus time was discarded without being recorded.
    FocusReset {
        discarded_ms: u64,
        at: DateTime<Utc>,
    },
    BreakStarted {
        focus_ms: u64,
        allowance_ms: u64,
        at: DateTime<Utc>,
    },
    /// The break allowance ran out. Fired exactly once per break.
    BreakExpired {
        allowance_ms: u64,
        at: DateTime<Utc>,
    },
    BreakEnded {
        duration_ms: u64,
        overtime_ms: u64,
        at: DateTime<Utc>,
    },
    /// A loaded running snapshot was re-entered after explicit confirmation.
    ResumeConfirmed {
        state: TimerState,
        at: DateTime<Utc>,
    },
    /// A loaded running snapshot was dropped; the engine is idle again.
    SnapshotDiscarded {
        at: DateTime<Utc>,
    },
    SessionFinalized {
        task_id: String,
        focus_ms: u64,
        records: usize,
        at: DateTime<Utc>,
    },
    /// Full engine status for the `status` command.
    StateSnapshot {
        state: TimerState,
        task_id: Option<String>,
        focus_elapsed_ms: u64,
        break_remaining_ms: u64,
        overtime_elapsed_ms: u64,
        ledger: Vec<SessionRecord>,
        session_started_at: Option<DateTime<Utc>>,
        at: DateTime<Utc>,
    },
}
