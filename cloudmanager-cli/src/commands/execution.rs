//! Execution command handlers
//!
//! Handles viewing, cancelling and advancing executions and streaming
//! step logs.

use anyhow::{Context, Result};
use clap::Subcommand;
use cloudmanager_client::CloudManagerClient;
use cloudmanager_core::domain::execution::PipelineExecution;
use cloudmanager_core::domain::step::StepStatus;
use colored::*;
use tracing::info;

use crate::config::Config;

/// Execution subcommands
#[derive(Subcommand)]
pub enum ExecutionCommands {
    /// Show the current execution of a pipeline
    Current {
        /// Program id
        program: String,
        /// Pipeline id
        pipeline: String,
    },
    /// Show a specific execution
    Get {
        /// Program id
        program: String,
        /// Pipeline id
        pipeline: String,
        /// Execution id
        execution: String,
    },
    /// List the executions of a pipeline
    List {
        /// Program id
        program: String,
        /// Pipeline id
        pipeline: String,
    },
    /// Cancel an execution (the current one if no id is given)
    Cancel {
        /// Program id
        program: String,
        /// Pipeline id
        pipeline: String,
        /// Execution id
        execution: Option<String>,
    },
    /// Advance an execution past its waiting step (the current one if no id is given)
    Advance {
        /// Program id
        program: String,
        /// Pipeline id
        pipeline: String,
        /// Execution id
        execution: Option<String>,
    },
    /// Stream a step's log to stdout
    Logs {
        /// Program id
        program: String,
        /// Pipeline id
        pipeline: String,
        /// Execution id
        execution: String,
        /// Step action (e.g. build, codeQuality)
        action: String,

        /// Alternate log file for steps producing several logs
        #[arg(short, long)]
        file: Option<String>,
    },
}

/// Handle execution commands
pub async fn handle_execution_command(command: ExecutionCommands, config: &Config) -> Result<()> {
    let client = config.client()?;

    match command {
        ExecutionCommands::Current { program, pipeline } => {
            let execution = client.get_current_execution(&program, &pipeline).await?;
            print_execution_details(&execution);
            Ok(())
        }
        ExecutionCommands::Get {
            program,
            pipeline,
            execution,
        } => {
            let execution = client.get_execution(&program, &pipeline, &execution).await?;
            print_execution_details(&execution);
            Ok(())
        }
        ExecutionCommands::List { program, pipeline } => {
            list_executions(&client, &program, &pipeline).await
        }
        ExecutionCommands::Cancel {
            program,
            pipeline,
            execution,
        } => {
            info!(
                "Cancelling {} execution of pipeline {} in program {}",
                execution.as_deref().unwrap_or("current"),
                pipeline,
                program
            );
            match execution {
                Some(id) => client.cancel_execution(&program, &pipeline, &id).await?,
                None => client.cancel_current_execution(&program, &pipeline).await?,
            }
            println!("{}", "✓ Cancellation requested.".green().bold());
            Ok(())
        }
        ExecutionCommands::Advance {
            program,
            pipeline,
            execution,
        } => {
            info!(
                "Advancing {} execution of pipeline {} in program {}",
                execution.as_deref().unwrap_or("current"),
                pipeline,
                program
            );
            match execution {
                Some(id) => client.advance_execution(&program, &pipeline, &id).await?,
                None => client.advance_current_execution(&program, &pipeline).await?,
            }
            println!("{}", "✓ Execution advanced.".green().bold());
            Ok(())
        }
        ExecutionCommands::Logs {
            program,
            pipeline,
            execution,
            action,
            file,
        } => {
            let mut stdout = tokio::io::stdout();
            client
                .get_execution_step_log(
                    &program,
                    &pipeline,
                    &execution,
                    &action,
                    file.as_deref(),
                    &mut stdout,
                )
                .await
                .with_context(|| format!("Failed to fetch {} log of execution {}", action, execution))
        }
    }
}

/// List the executions of a pipeline
async fn list_executions(client: &CloudManagerClient, program: &str, pipeline: &str) -> Result<()> {
    let executions = client.list_executions(program, pipeline).await?;

    if executions.is_empty() {
        println!("{}", "No executions found.".yellow());
    } else {
        println!(
            "{}",
            format!("Found {} execution(s):", executions.len()).bold()
        );
        println!();
        for execution in executions {
            println!("  {} {}", "▸".cyan(), execution.id.bold());
            println!("    Status:  {}", execution.status.to_string().yellow());
            if let Some(created) = &execution.created_at {
                println!("    Created: {}", created.dimmed());
            }
            println!();
        }
    }

    Ok(())
}

/// Print an execution with its phases and steps
fn print_execution_details(execution: &PipelineExecution) {
    println!("{}", "Execution Details:".bold());
    println!("  ID:          {}", execution.id.cyan());
    println!("  Program ID:  {}", execution.program_id);
    println!("  Pipeline ID: {}", execution.pipeline_id);
    println!("  Status:      {}", execution.status.to_string().yellow());
    if let Some(user) = &execution.user {
        println!("  User:        {}", user);
    }

    let phases = execution.phases();
    if phases.is_empty() {
        return;
    }

    println!("\n{}", "Steps:".bold());
    for phase in phases {
        println!("  {} {}", "Phase".dimmed(), phase.id.dimmed());
        for step in phase.steps {
            println!(
                "    {:<14} {}",
                step.action,
                colorize_status(step.status)
            );
        }
    }
}

fn colorize_status(status: StepStatus) -> ColoredString {
    match status {
        StepStatus::Finished => status.to_string().green(),
        StepStatus::Running | StepStatus::Waiting => status.to_string().yellow(),
        StepStatus::Error | StepStatus::Failed => status.to_string().red(),
        StepStatus::Cancelling | StepStatus::Cancelled => status.to_string().magenta(),
        StepStatus::NotStarted | StepStatus::Unknown => status.to_string().dimmed(),
    }
}
