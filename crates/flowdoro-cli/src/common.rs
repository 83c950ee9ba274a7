//! Shared helpers for CLI commands.

use flowdoro_core::{PersistenceGateway, SystemClock, TimerEngine};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Shown when a command needs a live timer state but the loaded snapshot is
/// still awaiting a decision.
pub const PENDING_RESUME_HINT: &str = "a resume decision is pending; re-run with --confirm to \
     continue from the snapshot, or run `flowdoro timer resume` / `flowdoro timer discard`";

/// Rebuild the engine from the stored snapshot. A missing or unreadable
/// snapshot yields a fresh idle engine; a non-idle snapshot comes back in
/// `PendingResume` awaiting an explicit decision.
pub fn load_engine(gateway: &PersistenceGateway<'_>) -> TimerEngine {
    match gateway.load() {
        Some(snapshot) => TimerEngine::restore(snapshot),
        None => TimerEngine::new(),
    }
}

/// Snapshot the engine. Called after every transition.
pub fn save_engine(gateway: &PersistenceGateway<'_>, engine: &TimerEngine) -> CliResult {
    gateway.save(engine.state(), engine.working_session(), &SystemClock)?;
    Ok(())
}

pub fn print_json<T: serde::Serialize>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
