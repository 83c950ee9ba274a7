//! Working-session ledger.
//!
//! A working session is the in-progress, not-yet-finalized sequence of
//! focus/break intervals for one task engagement. Records are appended when
//! an interval completes and are never rewritten afterwards; break overtime
//! is computed once at `end_break()` and stored alongside the record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Focus,
    Break,
}

/// One completed interval within a working session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub kind: RecordKind,
    /// Interval length in milliseconds. For breaks this is the allowance,
    /// not the wall-clock time spent on break.
    #[serde(rename = "duration")]
    pub duration_ms: u64,
    /// Break overtime in milliseconds; present only for `Break` records and
    /// only when greater than zero.
    #[serde(rename = "overtime", skip_serializing_if = "Option::is_none")]
    pub overtime_ms: Option<u64>,
}

impl SessionRecord {
    pub fn focus(duration_ms: u64) -> Self {
        Self {
            kind: RecordKind::Focus,
            duration_ms,
            overtime_ms: None,
        }
    }

    pub fn brk(duration_ms: u64, overtime_ms: u64) -> Self {
        Self {
            kind: RecordKind::Break,
            duration_ms,
            overtime_ms: (overtime_ms > 0).then_some(overtime_ms),
        }
    }
}

/// Ordered, append-only record of completed intervals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionLedger {
    records: Vec<SessionRecord>,
}

impl SessionLedger {
    pub fn append(&mut self, record: SessionRecord) {
        self.records.push(record);
    }

    /// Sum of recorded durations for one kind. Overtime is never included,
    /// so the finalized focus total is exactly the sum of Focus records.
    pub fn total_duration(&self, kind: RecordKind) -> u64 {
        self.records
            .iter()
            .filter(|r| r.kind == kind)
            .map(|r| r.duration_ms)
            .sum()
    }

    pub fn records(&self) -> &[SessionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

/// The not-yet-finalized session owned by one engine instance.
///
/// `started_at` is set on the first focus start and cleared only by a
/// successful finalize or an explicit discard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingSession {
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ledger: SessionLedger,
}

impl WorkingSession {
    /// True once any focus interval has been started against this session.
    pub fn is_active(&self) -> bool {
        self.started_at.is_some()
    }

    /// Drop all session state, returning to the pristine empty session.
    pub fn reset(&mut self) {
        self.task_id = None;
        self.started_at = None;
        self.ledger.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_duration_sums_per_kind() {
        let mut ledger = SessionLedger::default();
        ledger.append(SessionRecord::focus(300_000));
        ledger.append(SessionRecord::brk(60_000, 15_000));
        ledger.append(SessionRecord::focus(120_000));
        assert_eq!(ledger.total_duration(RecordKind::Focus), 420_000);
        assert_eq!(ledger.total_duration(RecordKind::Break), 60_000);
    }

    #[test]
    fn break_overtime_omitted_when_zero() {
        let rec = SessionRecord::brk(60_000, 0);
        assert_eq!(rec.overtime_ms, None);
        let json = serde_json::to_value(&rec).unwrap();
        assert!(json.get("overtime").is_none());

        let rec = SessionRecord::brk(60_000, 15_000);
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["overtime"], 15_000);
        assert_eq!(json["kind"], "break");
        assert_eq!(json["duration"], 60_000);
    }

    #[test]
    fn reset_clears_everything() {
        let mut session = WorkingSession {
            task_id: Some("t1".into()),
            started_at: Some(Utc::now()),
            ledger: SessionLedger::default(),
        };
        session.ledger.append(SessionRecord::focus(1_000));
        session.reset();
        assert!(!session.is_active());
        assert!(session.task_id.is_none());
        assert!(session.ledger.is_empty());
    }
}
