//! Snapshot persistence for the timer engine.
//!
//! The gateway writes one JSON value into the `kv` table on every engine
//! transition, and on a periodic cadence while a timer runs, to bound data
//! loss on abnormal termination. Writes are best-effort and the last write
//! for the key wins; the in-memory engine stays the source of truth while
//! the process lives. An absent or malformed value loads as `None`, never
//! as an error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::database::Database;
use crate::clock::Clock;
use crate::error::StorageError;
use crate::session::WorkingSession;
use crate::timer::TimerState;

pub const SNAPSHOT_KEY: &str = "timer_snapshot";

/// Durable engine snapshot, JSON-shaped per the kv entry contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSnapshot {
    pub timer_state: TimerState,
    pub working_session: WorkingSession,
    pub saved_at: DateTime<Utc>,
}

impl PersistedSnapshot {
    pub fn capture(
        timer_state: TimerState,
        working_session: WorkingSession,
        saved_at: DateTime<Utc>,
    ) -> Self {
        Self {
            timer_state,
            working_session,
            saved_at,
        }
    }
}

/// Reads and writes engine snapshots against the durable store.
pub struct PersistenceGateway<'a> {
    db: &'a Database,
}

impl<'a> PersistenceGateway<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Persist the current engine state.
    ///
    /// # Errors
    /// Returns an error if serialization or the kv write fails. Callers
    /// treat this as non-fatal; the next transition writes again.
    pub fn save<C: Clock>(
        &self,
        state: &TimerState,
        session: &WorkingSession,
        clock: &C,
    ) -> Result<(), StorageError> {
        let snapshot = PersistedSnapshot::capture(state.clone(), session.clone(), clock.now());
        let json = serde_json::to_string(&snapshot)?;
        self.db.kv_set(SNAPSHOT_KEY, &json)?;
        Ok(())
    }

    /// Load the stored snapshot. Absent, unreadable, and malformed all
    /// come back as `None`.
    pub fn load(&self) -> Option<PersistedSnapshot> {
        let json = self.db.kv_get(SNAPSHOT_KEY).ok().flatten()?;
        serde_json::from_str(&json).ok()
    }

    /// Remove the stored snapshot (after finalize or discard).
    ///
    /// # Errors
    /// Returns an error if the kv delete fails.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.db.kv_delete(SNAPSHOT_KEY)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::session::SessionRecord;
    use chrono::TimeZone;

    fn clock() -> ManualClock {
        ManualClock::starting_at(Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap())
    }

    #[test]
    fn save_then_load_roundtrips() {
        let db = Database::open_memory().unwrap();
        let gateway = PersistenceGateway::new(&db);
        let clock = clock();

        let state = TimerState::FocusPaused {
            accumulated_ms: 120_000,
        };
        let mut session = WorkingSession {
            task_id: Some("task-1".into()),
            started_at: Some(clock.now()),
            ..WorkingSession::default()
        };
        session.ledger.append(SessionRecord::focus(300_000));
        session.ledger.append(SessionRecord::brk(60_000, 15_000));

        gateway.save(&state, &session, &clock).unwrap();
        let loaded = gateway.load().unwrap();
        assert_eq!(loaded.timer_state, state);
        assert_eq!(loaded.working_session, session);
        assert_eq!(loaded.saved_at, clock.now());
    }

    #[test]
    fn missing_and_malformed_load_as_none() {
        let db = Database::open_memory().unwrap();
        let gateway = PersistenceGateway::new(&db);
        assert!(gateway.load().is_none());

        db.kv_set(SNAPSHOT_KEY, "not json at all").unwrap();
        assert!(gateway.load().is_none());

        db.kv_set(SNAPSHOT_KEY, "{\"timerState\":{\"type\":\"warp\"}}")
            .unwrap();
        assert!(gateway.load().is_none());
    }

    #[test]
    fn last_write_wins() {
        let db = Database::open_memory().unwrap();
        let gateway = PersistenceGateway::new(&db);
        let clock = clock();
        let session = WorkingSession::default();

        gateway
            .save(
                &TimerState::FocusPaused {
                    accumulated_ms: 1_000,
                },
                &session,
                &clock,
            )
            .unwrap();
        clock.advance_secs(10);
        gateway.save(&TimerState::Idle, &session, &clock).unwrap();

        let loaded = gateway.load().unwrap();
        assert_eq!(loaded.timer_state, TimerState::Idle);
    }

    #[test]
    fn clear_removes_the_snapshot() {
        let db = Database::open_memory().unwrap();
        let gateway = PersistenceGateway::new(&db);
        let clock = clock();
        gateway
            .save(&TimerState::Idle, &WorkingSession::default(), &clock)
            .unwrap();
        gateway.clear().unwrap();
        assert!(gateway.load().is_none());
    }

    #[test]
    fn snapshot_wire_shape_is_camel_case() {
        let clock = clock();
        let snapshot = PersistedSnapshot::capture(
            TimerState::BreakRunning {
                allowance_ms: 60_000,
                started_at: clock.now(),
            },
            WorkingSession::default(),
            clock.now(),
        );
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["timerState"]["type"], "breakRunning");
        assert_eq!(json["timerState"]["allowanceMs"], 60_000);
        assert!(json["workingSession"]["startedAt"].is_null());
        assert!(json["savedAt"].is_string());
    }
}
