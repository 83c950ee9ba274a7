//! Session finalization.
//!
//! Finalizing closes the working session and hands it to the remote store.
//! The clear happens only after the store accepts the submission; every
//! failure path leaves the session and its snapshot exactly as they were,
//! so a retry reproduces an identical payload.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::clock::Clock;
use crate::error::FinalizeError;
use crate::events::Event;
use crate::remote::{FocusSessionPayload, RemoteStore};
use crate::session::RecordKind;
use crate::storage::{Database, PersistenceGateway};
use crate::timer::TimerEngine;

/// Outcome of a successful finalize.
#[derive(Debug, Clone, Serialize)]
pub struct FinalizeResult {
    pub payload: FocusSessionPayload,
    pub finalized_at: DateTime<Utc>,
    /// Row id in the local archive, if archiving succeeded.
    pub archived_id: Option<i64>,
}

impl FinalizeResult {
    pub fn event(&self) -> Event {
        Event::SessionFinalized {
            task_id: self.payload.task_id.clone(),
            focus_ms: self.payload.duration,
            records: self.payload.records.len(),
            at: self.finalized_at,
        }
    }
}

/// Submits finalized sessions through a [`RemoteStore`].
pub struct SessionFinalizer<'a, S: RemoteStore> {
    store: &'a S,
}

impl<'a, S: RemoteStore> SessionFinalizer<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Build the session payload without submitting it. Fails unless the
    /// working session has started and no resume decision is pending.
    ///
    /// # Errors
    /// Returns an error if there is nothing to finalize.
    pub fn payload<C: Clock>(
        &self,
        engine: &TimerEngine<C>,
    ) -> Result<FocusSessionPayload, FinalizeError> {
        if engine.state().is_pending() {
            return Err(FinalizeError::ResumePending);
        }
        let session = engine.working_session();
        let started_at = session.started_at.ok_or(FinalizeError::NoSession)?;
        Ok(FocusSessionPayload {
            task_id: session.task_id.clone().unwrap_or_default(),
            duration: session.ledger.total_duration(RecordKind::Focus),
            date: started_at,
            records: session.ledger.records().to_vec(),
        })
    }

    /// Submit the working session and, on success only, clear the ledger,
    /// the snapshot, and `started_at`, then archive the session locally.
    ///
    /// Safe to call repeatedly with the same unsynced data: until a
    /// submission succeeds, nothing is cleared and the payload does not
    /// change.
    ///
    /// # Errors
    /// Returns an error if there is nothing to finalize, the submission
    /// fails, or the snapshot cannot be cleared afterwards. Only the last
    /// case can leave the remote ahead of local state; the retained
    /// snapshot keeps the retry safe.
    pub async fn finalize<C: Clock>(
        &self,
        engine: &mut TimerEngine<C>,
        gateway: &PersistenceGateway<'_>,
        db: &Database,
    ) -> Result<FinalizeResult, FinalizeError> {
        let payload = self.payload(engine)?;
        self.store.submit_session(&payload).await?;

        gateway.clear()?;
        let finalized_at = engine.now();
        let archived_id = db
            .archive_session(
                &payload.task_id,
                payload.duration,
                payload.records.len() as u64,
                payload.date,
                finalized_at,
            )
            .ok();
        engine.clear_working_session();

        Ok(FinalizeResult {
            payload,
            finalized_at,
            archived_id,
        })
    }
}
