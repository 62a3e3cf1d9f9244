//! Pipeline command handlers
//!
//! Handles listing the pipelines of a program and starting executions.

use anyhow::Result;
use clap::Subcommand;
use cloudmanager_client::CloudManagerClient;
use cloudmanager_core::domain::pipeline::{Pipeline, PipelineStatus};
use colored::*;
use tracing::info;

use crate::config::Config;

/// Pipeline subcommands
#[derive(Subcommand)]
pub enum PipelineCommands {
    /// List the pipelines of a program
    List {
        /// Program id
        program: String,
    },
    /// Start a new execution of a pipeline
    Start {
        /// Program id
        program: String,
        /// Pipeline id
        pipeline: String,
    },
}

/// Handle pipeline commands
pub async fn handle_pipeline_command(command: PipelineCommands, config: &Config) -> Result<()> {
    let client = config.client()?;

    match command {
        PipelineCommands::List { program } => list_pipelines(&client, &program).await,
        PipelineCommands::Start { program, pipeline } => {
            start_execution(&client, &program, &pipeline).await
        }
    }
}

/// List all pipelines of a program
async fn list_pipelines(client: &CloudManagerClient, program: &str) -> Result<()> {
    let pipelines = client.list_pipelines(program).await?;

    if pipelines.is_empty() {
        println!("{}", "No pipelines found.".yellow());
    } else {
        println!(
            "{}",
            format!("Found {} pipeline(s):", pipelines.len()).bold()
        );
        println!();
        for pipeline in pipelines {
            print_pipeline_summary(&pipeline);
        }
    }

    Ok(())
}

/// Start an execution
async fn start_execution(client: &CloudManagerClient, program: &str, pipeline: &str) -> Result<()> {
    info!("Starting pipeline {} in program {}", pipeline, program);
    let execution = client.start_execution_by_id(program, pipeline).await?;

    println!("{}", "✓ Execution started successfully!".green().bold());
    println!("  Execution ID: {}", execution.id.cyan());
    println!("  Pipeline ID:  {}", execution.pipeline_id.dimmed());
    println!("  Status:       {}", execution.status.to_string().yellow());

    Ok(())
}

/// Print a pipeline summary
fn print_pipeline_summary(pipeline: &Pipeline) {
    println!("  {} {}", "▸".cyan(), pipeline.name.bold());
    println!("    ID:      {}", pipeline.id.dimmed());
    println!("    Status:  {}", colorize_status(pipeline.status));
    if let Some(trigger) = &pipeline.trigger {
        println!("    Trigger: {}", trigger.dimmed());
    }
    if let Some(started) = &pipeline.last_started_at {
        println!("    Last started: {}", started.dimmed());
    }
    println!();
}

fn colorize_status(status: PipelineStatus) -> ColoredString {
    match status {
        PipelineStatus::Idle => status.to_string().green(),
        PipelineStatus::Busy => status.to_string().yellow(),
        PipelineStatus::Waiting => status.to_string().cyan(),
        PipelineStatus::Unknown => status.to_string().dimmed(),
    }
}
