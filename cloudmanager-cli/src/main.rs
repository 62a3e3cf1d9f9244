//! Cloud Manager CLI
//!
//! Command-line interface for inspecting and controlling Cloud Manager
//! pipeline executions.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing::{debug, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cmctl")]
#[command(about = "Cloud Manager pipeline CLI", long_about = None)]
struct Cli {
    /// Cloud Manager API base URL
    #[arg(
        long,
        env = "CLOUDMANAGER_BASE_URL",
        default_value = "https://cloudmanager.adobe.io"
    )]
    base_url: String,

    /// Bearer access token
    #[arg(long, env = "CLOUDMANAGER_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    /// Integration client id, sent as x-api-key
    #[arg(long, env = "CLOUDMANAGER_API_KEY")]
    api_key: Option<String>,

    /// IMS organization id
    #[arg(long, env = "CLOUDMANAGER_ORG_ID")]
    org_id: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "CLOUDMANAGER_TIMEOUT", default_value = "30")]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cloudmanager_client=info,cmctl=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config {
        base_url: cli.base_url,
        access_token: cli.access_token,
        api_key: cli.api_key,
        org_id: cli.org_id,
        timeout: std::time::Duration::from_secs(cli.timeout),
    };
    config.validate()?;

    debug!(
        "Using Cloud Manager API at {} (timeout {}s)",
        config.base_url,
        config.timeout.as_secs()
    );
    if config.access_token.is_none() {
        warn!("No access token configured; requests will be sent unauthenticated");
    }

    handle_command(cli.command, &config).await
}
