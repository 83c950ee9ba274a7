//! Timer engine implementation.
//!
//! The timer engine is a wall-clock-based state machine. It does not use
//! internal threads - the caller is responsible for calling `tick()`
//! periodically (or opportunistically before reads) and for serializing all
//! operations on one instance.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> FocusRunning <-> FocusPaused
//!                 \
//!                  begin_break -> BreakRunning -> BreakOvertime
//!                                        \______________/
//!                                           end_break -> Idle
//! ```
//!
//! A snapshot loaded with a non-idle state parks the engine in
//! `PendingResume` until the caller decides between `confirm_resume()` and
//! `discard_and_reset()`.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::{Clock, SystemClock};
use crate::error::EngineError;
use crate::events::Event;
use crate::session::{SessionRecord, WorkingSession};
use crate::storage::PersistedSnapshot;

/// One unit of break is granted per this many units of focus.
/// Fixed ratio, not reconfigurable at this layer.
pub const BREAK_DIVISOR: u64 = 5;

/// Timer state. Exactly one variant is active at any time; `allowance_ms`
/// is fixed when a break starts and never recomputed mid-break.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TimerState {
    Idle,
    #[serde(rename_all = "camelCase")]
    FocusRunning {
        started_at: DateTime<Utc>,
        accumulated_before_pause_ms: u64,
    },
    #[serde(rename_all = "camelCase")]
    FocusPaused { accumulated_ms: u64 },
    #[serde(rename_all = "camelCase")]
    BreakRunning {
        allowance_ms: u64,
        started_at: DateTime<Utc>,
    },
    #[serde(rename_all = "camelCase")]
    BreakOvertime {
        allowance_ms: u64,
        overtime_started_at: DateTime<Utc>,
    },
    /// A non-idle snapshot was loaded; ticking is held until the caller
    /// explicitly confirms or discards the saved state.
    #[serde(rename_all = "camelCase")]
    PendingResume {
        saved: Box<TimerState>,
        saved_at: DateTime<Utc>,
    },
}

/// How a confirmed resume treats the wall-clock gap between the snapshot
/// and now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumePolicy {
    /// The gap was unobserved (crash, suspend): rebase timestamps so it is
    /// not counted as focus or break time.
    SkipGap,
    /// The timer conceptually kept running across the gap (one-shot command
    /// invocations): keep the saved timestamps so the gap counts.
    CountGap,
}

impl TimerState {
    pub fn name(&self) -> &'static str {
        match self {
            TimerState::Idle => "idle",
            TimerState::FocusRunning { .. } => "focus running",
            TimerState::FocusPaused { .. } => "focus paused",
            TimerState::BreakRunning { .. } => "break running",
            TimerState::BreakOvertime { .. } => "break overtime",
            TimerState::PendingResume { .. } => "pending resume",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, TimerState::Idle)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, TimerState::PendingResume { .. })
    }
}

/// Core timer engine.
///
/// Operates on wall-clock deltas -- no internal thread, no tick counting.
/// All durations are recomputed from timestamps recorded at transitions, so
/// delayed, coalesced, or suspended ticks self-correct on the next call.
#[derive(Debug, Clone)]
pub struct TimerEngine<C: Clock = SystemClock> {
    clock: C,
    state: TimerState,
    session: WorkingSession,
}

impl TimerEngine<SystemClock> {
    /// Fresh idle engine with an empty working session.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Rebuild an engine from a persisted snapshot.
    pub fn restore(snapshot: PersistedSnapshot) -> Self {
        Self::restore_with_clock(snapshot, SystemClock)
    }
}

impl Default for TimerEngine<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> TimerEngine<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            state: TimerState::Idle,
            session: WorkingSession::default(),
        }
    }

    /// Rebuild an engine from a persisted snapshot.
    ///
    /// An `Idle` snapshot resumes directly. Any other saved state enters
    /// `PendingResume`: wall-clock time elapsed while unobserved is
    /// unknown-but-nonzero, so resuming silently could misrepresent elapsed
    /// focus or skip an entire break. The caller must decide via
    /// [`confirm_resume`](Self::confirm_resume) or
    /// [`discard_and_reset`](Self::discard_and_reset).
    pub fn restore_with_clock(snapshot: PersistedSnapshot, clock: C) -> Self {
        let state = match snapshot.timer_state {
            TimerState::Idle => TimerState::Idle,
            pending @ TimerState::PendingResume { .. } => pending,
            saved => TimerState::PendingResume {
                saved: Box::new(saved),
                saved_at: snapshot.saved_at,
            },
        };
        Self {
            clock,
            state,
            session: snapshot.working_session,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn working_session(&self) -> &WorkingSession {
        &self.session
    }

    /// Total focus time accumulated so far, live delta included.
    pub fn focus_elapsed(&self) -> u64 {
        match &self.state {
            TimerState::FocusRunning {
                started_at,
                accumulated_before_pause_ms,
            } => accumulated_before_pause_ms + ms_between(*started_at, self.clock.now()),
            TimerState::FocusPaused { accumulated_ms } => *accumulated_ms,
            _ => 0,
        }
    }

    /// Break allowance not yet consumed. Zero outside `BreakRunning`.
    pub fn break_remaining(&self) -> u64 {
        match &self.state {
            TimerState::BreakRunning {
                allowance_ms,
                started_at,
            } => allowance_ms.saturating_sub(ms_between(*started_at, self.clock.now())),
            _ => 0,
        }
    }

    /// Wall-clock time spent past the allowance. Zero outside `BreakOvertime`.
    pub fn overtime_elapsed(&self) -> u64 {
        match &self.state {
            TimerState::BreakOvertime {
                overtime_started_at,
                ..
            } => ms_between(*overtime_started_at, self.clock.now()),
            _ => 0,
        }
    }

    /// Full status payload for the `status` command.
    pub fn snapshot_event(&self) -> Event {
        Event::StateSnapshot {
            state: self.state.clone(),
            task_id: self.session.task_id.clone(),
            focus_elapsed_ms: self.focus_elapsed(),
            break_remaining_ms: self.break_remaining(),
            overtime_elapsed_ms: self.overtime_elapsed(),
            ledger: self.session.ledger.records().to_vec(),
            session_started_at: self.session.started_at,
            at: self.clock.now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start (or resume) focusing on a task. Valid from `Idle` and
    /// `FocusPaused`; the first start of a session stamps `started_at`.
    pub fn start_focus(&mut self, task_id: &str) -> Result<Event, EngineError> {
        let now = self.clock.now();
        let accumulated_ms = match &self.state {
            TimerState::Idle => 0,
            TimerState::FocusPaused { accumulated_ms } => *accumulated_ms,
            other => return Err(invalid(other, "start focus")),
        };
        if self.session.started_at.is_none() {
            self.session.started_at = Some(now);
        }
        self.session.task_id = Some(task_id.to_string());
        self.state = TimerState::FocusRunning {
            started_at: now,
            accumulated_before_pause_ms: accumulated_ms,
        };
        Ok(Event::FocusStarted {
            task_id: task_id.to_string(),
            accumulated_ms,
            at: now,
        })
    }

    pub fn pause_focus(&mut self) -> Result<Event, EngineError> {
        match self.state {
            TimerState::FocusRunning { .. } => {
                let now = self.clock.now();
                let elapsed_ms = self.focus_elapsed();
                self.state = TimerState::FocusPaused {
                    accumulated_ms: elapsed_ms,
                };
                Ok(Event::FocusPaused { elapsed_ms, at: now })
            }
            ref other => Err(invalid(other, "pause focus")),
        }
    }

    /// Bank the elapsed focus time as a ledger record and start the earned
    /// break. The allowance is fixed here for the break's whole lifetime.
    pub fn begin_break(&mut self) -> Result<Event, EngineError> {
        match self.state {
            TimerState::FocusRunning { .. } | TimerState::FocusPaused { .. } => {}
            ref other => return Err(invalid(other, "begin break")),
        }
        let focus_ms = self.focus_elapsed();
        if focus_ms == 0 {
            return Err(invalid(&self.state, "begin break"));
        }
        let now = self.clock.now();
        let allowance_ms = focus_ms / BREAK_DIVISOR;
        self.session.ledger.append(SessionRecord::focus(focus_ms));
        self.state = TimerState::BreakRunning {
            allowance_ms,
            started_at: now,
        };
        Ok(Event::BreakStarted {
            focus_ms,
            allowance_ms,
            at: now,
        })
    }

    /// Idempotent periodic driver. The only spontaneous transition lives
    /// here: a running break whose allowance has run out moves to
    /// `BreakOvertime`, and the expiry event fires exactly once because the
    /// state transition itself is the edge.
    pub fn tick(&mut self) -> Option<Event> {
        if let TimerState::BreakRunning {
            allowance_ms,
            started_at,
        } = self.state
        {
            let consumed = ms_between(started_at, self.clock.now());
            if consumed >= allowance_ms {
                // Overtime is measured from the true expiry boundary, not
                // from this tick, so a tick arriving minutes late still
                // attributes the full overtime.
                self.state = TimerState::BreakOvertime {
                    allowance_ms,
                    overtime_started_at: started_at
                        + Duration::milliseconds(allowance_ms as i64),
                };
                return Some(Event::BreakExpired {
                    allowance_ms,
                    at: self.clock.now(),
                });
            }
        }
        None
    }

    /// End the break and record it. The recorded duration is the allowance;
    /// overtime is computed here, once, and never rewritten afterwards.
    pub fn end_break(&mut self) -> Result<Event, EngineError> {
        let now = self.clock.now();
        let (allowance_ms, overtime_ms) = match self.state {
            TimerState::BreakRunning {
                allowance_ms,
                started_at,
            } => {
                // The caller may not have ticked since expiry.
                let consumed = ms_between(started_at, now);
                (allowance_ms, consumed.saturating_sub(allowance_ms))
            }
            TimerState::BreakOvertime {
                allowance_ms,
                overtime_started_at,
            } => (allowance_ms, ms_between(overtime_started_at, now)),
            ref other => return Err(invalid(other, "end break")),
        };
        self.session
            .ledger
            .append(SessionRecord::brk(allowance_ms, overtime_ms));
        self.state = TimerState::Idle;
        Ok(Event::BreakEnded {
            duration_ms: allowance_ms,
            overtime_ms,
            at: now,
        })
    }

    /// Discard accumulated focus time without recording it. Used when a
    /// break is declined before being taken - the time must not be
    /// double-recorded later.
    pub fn reset_focus(&mut self) -> Result<Event, EngineError> {
        match self.state {
            TimerState::FocusRunning { .. } | TimerState::FocusPaused { .. } => {
                let discarded_ms = self.focus_elapsed();
                self.state = TimerState::Idle;
                Ok(Event::FocusReset {
                    discarded_ms,
                    at: self.clock.now(),
                })
            }
            ref other => Err(invalid(other, "reset focus")),
        }
    }

    /// Re-enter the saved state from `PendingResume` with the gap treated
    /// as unobserved: timestamps are rebased to now minus the duration that
    /// had accumulated at save time, so the gap is not counted as focus or
    /// break time. Equivalent to `confirm_resume_with(ResumePolicy::SkipGap)`.
    pub fn confirm_resume(&mut self) -> Result<Event, EngineError> {
        self.confirm_resume_with(ResumePolicy::SkipGap)
    }

    /// Re-enter the saved state from `PendingResume` under the given gap
    /// policy. Either way, subsequent elapsed computations are correct and
    /// normal ticking resumes.
    pub fn confirm_resume_with(&mut self, policy: ResumePolicy) -> Result<Event, EngineError> {
        let (saved, saved_at) = match &self.state {
            TimerState::PendingResume { saved, saved_at } => ((**saved).clone(), *saved_at),
            other => return Err(invalid(other, "confirm resume")),
        };
        let now = self.clock.now();
        self.state = match policy {
            // The saved timestamps are still valid wall-clock anchors; keep
            // them and the gap counts as running time.
            ResumePolicy::CountGap => saved,
            ResumePolicy::SkipGap => match saved {
                TimerState::FocusRunning {
                    started_at,
                    accumulated_before_pause_ms,
                } => TimerState::FocusRunning {
                    started_at: now,
                    accumulated_before_pause_ms: accumulated_before_pause_ms
                        + ms_between(started_at, saved_at),
                },
                TimerState::BreakRunning {
                    allowance_ms,
                    started_at,
                } => TimerState::BreakRunning {
                    allowance_ms,
                    started_at: now
                        - Duration::milliseconds(ms_between(started_at, saved_at) as i64),
                },
                TimerState::BreakOvertime {
                    allowance_ms,
                    overtime_started_at,
                } => TimerState::BreakOvertime {
                    allowance_ms,
                    overtime_started_at: now
                        - Duration::milliseconds(ms_between(overtime_started_at, saved_at) as i64),
                },
                timeless => timeless,
            },
        };
        Ok(Event::ResumeConfirmed {
            state: self.state.clone(),
            at: now,
        })
    }

    /// Drop the saved state and the working session, returning to `Idle`.
    /// Also serves as the explicit session discard outside `PendingResume`.
    pub fn discard_and_reset(&mut self) -> Result<Event, EngineError> {
        self.state = TimerState::Idle;
        self.session.reset();
        Ok(Event::SnapshotDiscarded {
            at: self.clock.now(),
        })
    }

    /// Clear session state after a successful finalize.
    pub(crate) fn clear_working_session(&mut self) {
        self.session.reset();
    }

    pub(crate) fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }
}

fn invalid(state: &TimerState, operation: &'static str) -> EngineError {
    EngineError::InvalidTransition {
        state: state.name(),
        operation,
    }
}

fn ms_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> u64 {
    later
        .signed_duration_since(earlier)
        .num_milliseconds()
        .max(0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::session::RecordKind;
    use chrono::TimeZone;

    fn engine() -> (ManualClock, TimerEngine<ManualClock>) {
        let clock =
            ManualClock::starting_at(Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap());
        let engine = TimerEngine::with_clock(clock.clone());
        (clock, engine)
    }

    #[test]
    fn focus_elapsed_tracks_wall_clock_across_pause() {
        let (clock, mut engine) = engine();
        engine.start_focus("t1").unwrap();
        clock.advance_secs(120);
        assert_eq!(engine.focus_elapsed(), 120_000);

        engine.pause_focus().unwrap();
        clock.advance_secs(600); // Paused time does not count.
        assert_eq!(engine.focus_elapsed(), 120_000);

        engine.start_focus("t1").unwrap();
        clock.advance_secs(60);
        assert_eq!(engine.focus_elapsed(), 180_000);
    }

    #[test]
    fn first_start_stamps_session_once() {
        let (clock, mut engine) = engine();
        let started = clock.now();
        engine.start_focus("t1").unwrap();
        clock.advance_secs(30);
        engine.pause_focus().unwrap();
        engine.start_focus("t1").unwrap();
        assert_eq!(engine.working_session().started_at, Some(started));
    }

    #[test]
    fn begin_break_banks_focus_and_fixes_allowance() {
        let (clock, mut engine) = engine();
        engine.start_focus("t1").unwrap();
        clock.advance_secs(300);
        let event = engine.begin_break().unwrap();
        match event {
            Event::BreakStarted {
                focus_ms,
                allowance_ms,
                ..
            } => {
                assert_eq!(focus_ms, 300_000);
                assert_eq!(allowance_ms, 60_000);
            }
            other => panic!("expected BreakStarted, got {other:?}"),
        }
        let ledger = engine.working_session().ledger.records();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger[0].kind, RecordKind::Focus);
        assert_eq!(ledger[0].duration_ms, 300_000);
        assert_eq!(engine.focus_elapsed(), 0);
    }

    #[test]
    fn break_expiry_scenario_300s_focus_75s_break() {
        let (clock, mut engine) = engine();
        engine.start_focus("t1").unwrap();
        clock.advance_secs(300);
        engine.begin_break().unwrap();

        clock.advance_secs(75);
        assert!(matches!(engine.tick(), Some(Event::BreakExpired { .. })));
        assert_eq!(engine.break_remaining(), 0);
        // Overtime counts from the allowance boundary, not the late tick.
        assert_eq!(engine.overtime_elapsed(), 15_000);
    }

    #[test]
    fn break_expired_fires_exactly_once() {
        let (clock, mut engine) = engine();
        engine.start_focus("t1").unwrap();
        clock.advance_secs(100);
        engine.begin_break().unwrap();
        clock.advance_secs(30);
        assert!(engine.tick().is_some());
        clock.advance_secs(5);
        assert!(engine.tick().is_none());
        assert!(engine.tick().is_none());
    }

    #[test]
    fn end_break_records_allowance_and_overtime() {
        let (clock, mut engine) = engine();
        engine.start_focus("t1").unwrap();
        clock.advance_secs(300);
        engine.begin_break().unwrap();
        clock.advance_secs(75);
        engine.tick();
        clock.advance_secs(10);
        let event = engine.end_break().unwrap();
        match event {
            Event::BreakEnded {
                duration_ms,
                overtime_ms,
                ..
            } => {
                assert_eq!(duration_ms, 60_000);
                assert_eq!(overtime_ms, 25_000);
            }
            other => panic!("expected BreakEnded, got {other:?}"),
        }
        let ledger = engine.working_session().ledger.records();
        assert_eq!(ledger[1].kind, RecordKind::Break);
        assert_eq!(ledger[1].duration_ms, 60_000);
        assert_eq!(ledger[1].overtime_ms, Some(25_000));
        assert!(engine.state().is_idle());
    }

    #[test]
    fn end_break_without_tick_still_captures_overtime() {
        let (clock, mut engine) = engine();
        engine.start_focus("t1").unwrap();
        clock.advance_secs(300);
        engine.begin_break().unwrap();
        clock.advance_secs(90); // Expired 30s ago, but nobody ticked.
        let event = engine.end_break().unwrap();
        match event {
            Event::BreakEnded { overtime_ms, .. } => assert_eq!(overtime_ms, 30_000),
            other => panic!("expected BreakEnded, got {other:?}"),
        }
    }

    #[test]
    fn early_end_break_records_no_overtime() {
        let (clock, mut engine) = engine();
        engine.start_focus("t1").unwrap();
        clock.advance_secs(300);
        engine.begin_break().unwrap();
        clock.advance_secs(20);
        engine.end_break().unwrap();
        let ledger = engine.working_session().ledger.records();
        assert_eq!(ledger[1].duration_ms, 60_000);
        assert_eq!(ledger[1].overtime_ms, None);
    }

    #[test]
    fn reset_focus_discards_without_recording() {
        let (clock, mut engine) = engine();
        engine.start_focus("t1").unwrap();
        clock.advance_secs(90);
        let event = engine.reset_focus().unwrap();
        match event {
            Event::FocusReset { discarded_ms, .. } => assert_eq!(discarded_ms, 90_000),
            other => panic!("expected FocusReset, got {other:?}"),
        }
        assert!(engine.working_session().ledger.is_empty());
        assert_eq!(engine.focus_elapsed(), 0);
        assert!(engine.state().is_idle());
    }

    #[test]
    fn invalid_transitions_are_rejected_and_harmless() {
        let (_clock, mut engine) = engine();
        assert_eq!(
            engine.pause_focus().unwrap_err(),
            EngineError::InvalidTransition {
                state: "idle",
                operation: "pause focus"
            }
        );
        assert!(engine.begin_break().is_err());
        assert!(engine.end_break().is_err());
        assert!(engine.confirm_resume().is_err());
        assert!(engine.state().is_idle());

        engine.start_focus("t1").unwrap();
        assert!(engine.start_focus("t1").is_err()); // Already running.
        assert!(engine.end_break().is_err());
        assert!(matches!(engine.state(), TimerState::FocusRunning { .. }));
    }

    #[test]
    fn begin_break_needs_nonzero_focus() {
        let (_clock, mut engine) = engine();
        engine.start_focus("t1").unwrap();
        // No time has passed.
        assert!(engine.begin_break().is_err());
        assert!(engine.working_session().ledger.is_empty());
    }

    #[test]
    fn restore_running_state_holds_for_decision() {
        let (clock, mut engine) = engine();
        engine.start_focus("t1").unwrap();
        clock.advance_secs(120);
        let snapshot = PersistedSnapshot::capture(
            engine.state().clone(),
            engine.working_session().clone(),
            clock.now(),
        );

        clock.advance_secs(3600); // Unobserved gap.
        let mut restored = TimerEngine::restore_with_clock(snapshot, clock.clone());
        assert!(restored.state().is_pending());
        assert_eq!(restored.focus_elapsed(), 0);
        restored.tick();
        assert!(restored.state().is_pending()); // Ticking stays held.

        restored.confirm_resume().unwrap();
        // The hour-long gap is not counted as focus time.
        assert_eq!(restored.focus_elapsed(), 120_000);
        clock.advance_secs(10);
        assert_eq!(restored.focus_elapsed(), 130_000);
    }

    #[test]
    fn restore_idle_resumes_directly() {
        let (clock, mut engine) = engine();
        engine.start_focus("t1").unwrap();
        clock.advance_secs(300);
        engine.begin_break().unwrap();
        clock.advance_secs(10);
        engine.end_break().unwrap();
        let snapshot = PersistedSnapshot::capture(
            engine.state().clone(),
            engine.working_session().clone(),
            clock.now(),
        );
        let restored = TimerEngine::restore_with_clock(snapshot, clock.clone());
        assert!(restored.state().is_idle());
        assert_eq!(restored.working_session().ledger.len(), 2);
    }

    #[test]
    fn discard_and_reset_clears_the_session() {
        let (clock, mut engine) = engine();
        engine.start_focus("t1").unwrap();
        clock.advance_secs(300);
        engine.begin_break().unwrap();
        let snapshot = PersistedSnapshot::capture(
            engine.state().clone(),
            engine.working_session().clone(),
            clock.now(),
        );
        let mut restored = TimerEngine::restore_with_clock(snapshot, clock.clone());
        restored.discard_and_reset().unwrap();
        assert!(restored.state().is_idle());
        assert!(restored.working_session().ledger.is_empty());
        assert!(restored.working_session().started_at.is_none());
    }

    #[test]
    fn discard_and_reset_works_mid_focus() {
        let (clock, mut engine) = engine();
        engine.start_focus("t1").unwrap();
        clock.advance_secs(300);
        engine.begin_break().unwrap();
        clock.advance_secs(10);
        engine.end_break().unwrap();
        engine.start_focus("t1").unwrap();
        clock.advance_secs(90);
        engine.discard_and_reset().unwrap();
        assert!(engine.state().is_idle());
        assert!(engine.working_session().ledger.is_empty());
        assert!(engine.working_session().started_at.is_none());
    }

    #[test]
    fn resume_counting_gap_keeps_wall_clock_elapsed() {
        // One-shot command flow: each invocation is a fresh process that
        // loads the snapshot, resolves the held state, applies one
        // operation, and saves again. The time between invocations is real
        // running time and must survive the round trip.
        let (clock, mut engine) = engine();
        engine.start_focus("t1").unwrap();
        let snapshot = PersistedSnapshot::capture(
            engine.state().clone(),
            engine.working_session().clone(),
            clock.now(),
        );

        clock.advance_secs(300); // Focus continues between invocations.
        let mut restored = TimerEngine::restore_with_clock(snapshot, clock.clone());
        assert!(restored.state().is_pending());
        restored.confirm_resume_with(ResumePolicy::CountGap).unwrap();
        assert_eq!(restored.focus_elapsed(), 300_000);

        let event = restored.begin_break().unwrap();
        assert!(matches!(
            event,
            Event::BreakStarted {
                focus_ms: 300_000,
                allowance_ms: 60_000,
                ..
            }
        ));
    }

    #[test]
    fn resume_counting_gap_lets_an_overdue_break_expire() {
        let (clock, mut engine) = engine();
        engine.start_focus("t1").unwrap();
        clock.advance_secs(300); // 60s allowance.
        engine.begin_break().unwrap();
        let snapshot = PersistedSnapshot::capture(
            engine.state().clone(),
            engine.working_session().clone(),
            clock.now(),
        );

        clock.advance_secs(75); // Break ran past its allowance off-process.
        let mut restored = TimerEngine::restore_with_clock(snapshot, clock.clone());
        restored.confirm_resume_with(ResumePolicy::CountGap).unwrap();
        assert!(matches!(restored.tick(), Some(Event::BreakExpired { .. })));
        assert_eq!(restored.overtime_elapsed(), 15_000);
    }

    #[test]
    fn confirm_resume_rebases_break_remaining() {
        let (clock, mut engine) = engine();
        engine.start_focus("t1").unwrap();
        clock.advance_secs(300); // 60s allowance.
        engine.begin_break().unwrap();
        clock.advance_secs(20); // 40s left at save time.
        let snapshot = PersistedSnapshot::capture(
            engine.state().clone(),
            engine.working_session().clone(),
            clock.now(),
        );

        clock.advance_secs(7200);
        let mut restored = TimerEngine::restore_with_clock(snapshot, clock.clone());
        restored.confirm_resume().unwrap();
        assert_eq!(restored.break_remaining(), 40_000);
        clock.advance_secs(40);
        assert!(matches!(restored.tick(), Some(Event::BreakExpired { .. })));
    }
}
