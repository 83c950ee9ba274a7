use clap::Subcommand;
use flowdoro_core::{ApiClient, Config};

use crate::common::{print_json, CliResult};

#[derive(Subcommand)]
pub enum TaskAction {
    /// List tasks from the remote store
    List,
    /// Create a task
    Create { name: String },
    /// Delete a task by id
    Delete { id: String },
}

pub fn run(action: TaskAction) -> CliResult {
    let config = Config::load_or_default();
    let client = ApiClient::new(&config.api.base_url)?;
    let runtime = tokio::runtime::Runtime::new()?;

    match action {
        TaskAction::List => {
            let tasks = runtime.block_on(client.list_tasks())?;
            print_json(&tasks)?;
        }
        TaskAction::Create { name } => {
            let task = runtime.block_on(client.create_task(&name))?;
            print_json(&task)?;
        }
        TaskAction::Delete { id } => {
            runtime.block_on(client.delete_task(&id))?;
            eprintln!("Task deleted: {id}");
        }
    }
    Ok(())
}
