use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::{info, warn};

use plexhook::bridge;
use plexhook::config::Config;
use plexhook::plex::action::Action;
use plexhook::slack::client::SlackClient;

/// plexhook: forward Plex webhooks to a Slack incoming webhook.
///
/// Each playback or rating event becomes one Slack message. Which events
/// are forwarded is controlled by the SEND_* environment variables.
#[derive(Parser)]
#[command(name = "plexhook", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the webhook server
    Serve {
        /// Port to listen on (overrides PORT)
        #[arg(long)]
        port: Option<u16>,

        /// Address to bind (overrides PLEXHOOK_BIND)
        #[arg(long)]
        bind: Option<String>,
    },

    /// Show the Slack message a saved Plex payload would produce, without sending it
    Preview {
        /// Path to a Plex webhook JSON payload
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before the subscriber so RUST_LOG can come from it
    let dotenv = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("plexhook=info")),
        )
        .init();

    if let Err(e) = dotenv {
        warn!(error = %e, "No .env file loaded, using process environment only");
    }

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, bind } => {
            let mut config = Config::load()?;
            config.require_slack_url()?;
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(bind) = bind {
                config.bind = bind;
            }

            let enabled: Vec<&str> = Action::RECOGNIZED
                .iter()
                .filter(|a| config.toggles.is_enabled(**a))
                .map(|a| a.as_str())
                .collect();
            info!(enabled = ?enabled, "Forwarding enabled for actions");

            let client =
                SlackClient::new(&config.slack_url).context("Failed to build HTTP client")?;
            plexhook::web::run_server(config, Arc::new(client)).await?;
        }

        Commands::Preview { file } => {
            let config = Config::load()?;
            let payload = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;

            let prepared = bridge::prepare(&payload, &config)?;

            println!("Event:  {} ({})", prepared.event, prepared.action);
            if prepared.message.send {
                println!("Send:   {}", "yes".green().bold());
            } else {
                println!("Send:   {}", "no (toggle disabled)".yellow());
            }
            println!("{}", serde_json::to_string_pretty(&prepared.message)?);
        }
    }

    Ok(())
}
