use clap::Subcommand;
use flowdoro_core::storage::Database;
use flowdoro_core::{ApiClient, Config, PersistenceGateway, ResumePolicy, SessionFinalizer};

use crate::common::{load_engine, print_json, save_engine, CliResult, PENDING_RESUME_HINT};

#[derive(Subcommand)]
pub enum SessionAction {
    /// Print the working session as JSON
    Show,
    /// Submit the working session to the remote store and clear it
    Finalize {
        /// Pick up the held snapshot, counting time since it as elapsed
        #[arg(long)]
        confirm: bool,
    },
    /// Discard the working session without submitting it
    Discard,
    /// List finalized sessions from the local archive
    History {
        #[arg(long, default_value = "20")]
        limit: u32,
        /// Fetch from the remote store instead of the local archive
        #[arg(long)]
        remote: bool,
    },
}

pub fn run(action: SessionAction) -> CliResult {
    let db = Database::open()?;
    let gateway = PersistenceGateway::new(&db);
    let mut engine = load_engine(&gateway);

    match action {
        SessionAction::Show => {
            print_json(engine.working_session())?;
        }
        SessionAction::Finalize { confirm } => {
            if engine.state().is_pending() {
                if !confirm {
                    return Err(PENDING_RESUME_HINT.into());
                }
                let event = engine.confirm_resume_with(ResumePolicy::CountGap)?;
                print_json(&event)?;
                save_engine(&gateway, &engine)?;
            }
            let config = Config::load_or_default();
            let client = ApiClient::new(&config.api.base_url)?;
            let finalizer = SessionFinalizer::new(&client);
            let runtime = tokio::runtime::Runtime::new()?;
            // On failure the session and snapshot are retained unchanged;
            // rerunning this command retries the identical payload.
            let result = runtime.block_on(finalizer.finalize(&mut engine, &gateway, &db))?;
            print_json(&result.event())?;
        }
        SessionAction::Discard => {
            let event = engine.discard_and_reset()?;
            gateway.clear()?;
            print_json(&event)?;
        }
        SessionAction::History { limit, remote } => {
            if remote {
                let config = Config::load_or_default();
                let client = ApiClient::new(&config.api.base_url)?;
                let runtime = tokio::runtime::Runtime::new()?;
                let sessions = runtime.block_on(client.list_sessions())?;
                print_json(&sessions)?;
            } else {
                let sessions = db.list_archived(limit)?;
                print_json(&sessions)?;
            }
        }
    }
    Ok(())
}
