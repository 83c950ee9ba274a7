//! # Flowdoro Core Library
//!
//! Core business logic for the Flowdoro focus/break timer. A focus interval
//! runs as an open-ended stopwatch against a task; elapsed focus time buys a
//! proportional break (one break unit per five focus units); the resulting
//! sequence of intervals is a working session that is persisted locally and
//! eventually finalized to a remote store.
//!
//! The CLI binary is the only dispatch layer: it serializes all engine
//! operations, drives the periodic tick, and snapshots state after every
//! transition.
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: wall-clock state machine (the caller ticks it)
//! - [`SessionLedger`]: append-only record of completed intervals
//! - [`PersistenceGateway`]: snapshot/restore with explicit resume
//!   confirmation after a reload
//! - [`SessionFinalizer`]: packages and submits the finished session

pub mod clock;
pub mod error;
pub mod events;
pub mod finalize;
pub mod remote;
pub mod session;
pub mod storage;
pub mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{ConfigError, CoreError, EngineError, FinalizeError, RemoteError, StorageError};
pub use events::Event;
pub use finalize::{FinalizeResult, SessionFinalizer};
pub use remote::{ApiClient, FocusSessionPayload, RemoteSession, RemoteStore, Task};
pub use session::{RecordKind, SessionLedger, SessionRecord, WorkingSession};
pub use storage::{Config, Database, PersistedSnapshot, PersistenceGateway};
pub use timer::{ResumePolicy, TimerEngine, TimerState, BREAK_DIVISOR};
