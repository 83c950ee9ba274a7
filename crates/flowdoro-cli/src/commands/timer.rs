use std::time::Duration;

use clap::Subcommand;
use flowdoro_core::storage::Database;
use flowdoro_core::{Config, PersistenceGateway, ResumePolicy};

use crate::common::{load_engine, print_json, save_engine, CliResult, PENDING_RESUME_HINT};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start or resume focusing on a task
    Start {
        /// Task to track
        #[arg(long)]
        task: String,
        /// Pick up the held snapshot, counting time since it as elapsed
        #[arg(long)]
        confirm: bool,
    },
    /// Pause the running focus stopwatch
    Pause {
        /// Pick up the held snapshot, counting time since it as elapsed
        #[arg(long)]
        confirm: bool,
    },
    /// Bank the elapsed focus time and start the earned break
    Break {
        /// Pick up the held snapshot, counting time since it as elapsed
        #[arg(long)]
        confirm: bool,
    },
    /// End the current break and record it
    EndBreak {
        /// Pick up the held snapshot, counting time since it as elapsed
        #[arg(long)]
        confirm: bool,
    },
    /// Discard accumulated focus time without recording it
    Reset {
        /// Pick up the held snapshot, counting time since it as elapsed
        #[arg(long)]
        confirm: bool,
    },
    /// Apply one tick and print the event, if any
    Tick,
    /// Print current timer state as JSON
    Status,
    /// Re-enter the state loaded from the last snapshot
    Resume {
        /// Count the time since the snapshot as elapsed running time
        /// instead of treating it as an unobserved gap
        #[arg(long)]
        count_gap: bool,
    },
    /// Drop the loaded snapshot and clear the working session
    Discard,
    /// Tick at the configured cadence until Ctrl-C
    Watch {
        /// Pick up the held snapshot, counting time since it as elapsed
        #[arg(long)]
        confirm: bool,
    },
}

impl TimerAction {
    /// Commands that need a live (non-pending) state to act on. `confirm`
    /// picks up the held snapshot in the same invocation; every one-shot
    /// command run after a snapshot was saved needs it, since the snapshot
    /// always loads held.
    fn resolves_pending(&self) -> Option<bool> {
        match self {
            TimerAction::Start { confirm, .. }
            | TimerAction::Pause { confirm }
            | TimerAction::Break { confirm }
            | TimerAction::EndBreak { confirm }
            | TimerAction::Reset { confirm }
            | TimerAction::Watch { confirm } => Some(*confirm),
            _ => None,
        }
    }
}

pub fn run(action: TimerAction) -> CliResult {
    let db = Database::open()?;
    let gateway = PersistenceGateway::new(&db);
    let mut engine = load_engine(&gateway);

    // A snapshot from a previous invocation always loads held. The timer
    // kept running on the wall clock in between, so `--confirm` re-enters
    // it counting that time as elapsed.
    if engine.state().is_pending() {
        match action.resolves_pending() {
            Some(true) => {
                let event = engine.confirm_resume_with(ResumePolicy::CountGap)?;
                print_json(&event)?;
                save_engine(&gateway, &engine)?;
            }
            Some(false) => return Err(PENDING_RESUME_HINT.into()),
            None => {}
        }
    }

    // Ticks may have been missed arbitrarily long; catch up before acting.
    if let Some(expired) = engine.tick() {
        print_json(&expired)?;
        save_engine(&gateway, &engine)?;
    }

    match action {
        TimerAction::Start { task, .. } => {
            let event = engine.start_focus(&task)?;
            print_json(&event)?;
        }
        TimerAction::Pause { .. } => {
            let event = engine.pause_focus()?;
            print_json(&event)?;
        }
        TimerAction::Break { .. } => {
            let event = engine.begin_break()?;
            print_json(&event)?;
        }
        TimerAction::EndBreak { .. } => {
            let event = engine.end_break()?;
            print_json(&event)?;
        }
        TimerAction::Reset { .. } => {
            let event = engine.reset_focus()?;
            print_json(&event)?;
        }
        TimerAction::Tick => {}
        TimerAction::Status => {
            print_json(&engine.snapshot_event())?;
        }
        TimerAction::Resume { count_gap } => {
            let policy = if count_gap {
                ResumePolicy::CountGap
            } else {
                ResumePolicy::SkipGap
            };
            let event = engine.confirm_resume_with(policy)?;
            print_json(&event)?;
        }
        TimerAction::Discard => {
            let event = engine.discard_and_reset()?;
            gateway.clear()?;
            print_json(&event)?;
        }
        TimerAction::Watch { .. } => {
            return watch(&gateway, engine);
        }
    }

    save_engine(&gateway, &engine)
}

/// Drive the engine until Ctrl-C: tick at `timer.tick_interval_secs`,
/// snapshot at `timer.snapshot_interval_secs`. Both cadences are periodic
/// hints, not clocks - the engine recomputes everything from wall-clock
/// timestamps, so delayed or coalesced iterations are harmless.
fn watch(
    gateway: &PersistenceGateway<'_>,
    mut engine: flowdoro_core::TimerEngine,
) -> CliResult {
    if engine.state().is_pending() {
        return Err(PENDING_RESUME_HINT.into());
    }
    let config = Config::load_or_default();
    let tick_every = Duration::from_secs(config.timer.tick_interval_secs.max(1));
    let snapshot_every = Duration::from_secs(config.timer.snapshot_interval_secs.max(1));

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let mut ticker = tokio::time::interval(tick_every);
        let mut snapshotter = tokio::time::interval(snapshot_every);
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Some(event) = engine.tick() {
                        print_json(&event)?;
                        save_engine(gateway, &engine)?;
                    }
                }
                _ = snapshotter.tick() => {
                    save_engine(gateway, &engine)?;
                }
                _ = &mut ctrl_c => {
                    save_engine(gateway, &engine)?;
                    return Ok(());
                }
            }
        }
    })
}
