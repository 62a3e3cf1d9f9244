//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod execution;
mod pipeline;

pub use execution::ExecutionCommands;
pub use pipeline::PipelineCommands;

use anyhow::Result;
use clap::Subcommand;
use tracing::debug;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Pipeline management
    Pipeline {
        #[command(subcommand)]
        command: PipelineCommands,
    },
    /// Execution inspection and control
    Execution {
        #[command(subcommand)]
        command: ExecutionCommands,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Pipeline { command } => {
            debug!("Dispatching pipeline command");
            pipeline::handle_pipeline_command(command, config).await
        }
        Commands::Execution { command } => {
            debug!("Dispatching execution command");
            execution::handle_execution_command(command, config).await
        }
    }
}
