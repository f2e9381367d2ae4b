//! hive-agent - command-line client for a Hive Agent.
//!
//! Main entry point for the CLI.

use std::str::FromStr;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::{chat, entry, files, history, prompts, table, tools};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// hive-agent - talk to a Hive Agent from the command line
#[derive(Parser)]
#[command(name = "hive-agent")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,

    /// Agent URL (default: from config, then http://localhost:8000)
    #[arg(long, global = true, env = "HIVE_AGENT_URL")]
    pub server: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Send a chat message to the agent
    Chat(chat::ChatArgs),

    /// Show chat history
    History(history::HistoryArgs),

    /// Manage namespaced entries
    Entry(entry::EntryArgs),

    /// Manage database tables
    Table(table::TableArgs),

    /// Manage stored files
    Files(files::FilesArgs),

    /// Manage agent tools
    Tools(tools::ToolsArgs),

    /// List sample prompts
    Prompts,
}

/// Environment variable selecting the log level.
const LOG_LEVEL_ENV: &str = "HIVE_AGENT_LOG_LEVEL";

/// Resolve the console log level; unknown values fall back to `info`.
fn log_level(verbose: bool, configured: Option<&str>) -> tracing::Level {
    if verbose {
        return tracing::Level::DEBUG;
    }
    configured
        .and_then(|level| tracing::Level::from_str(level.trim()).ok())
        .unwrap_or(tracing::Level::INFO)
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing: console (human-readable) + rotating JSON file
    let level = log_level(cli.verbose, std::env::var(LOG_LEVEL_ENV).ok().as_deref());
    let level = level.as_str().to_ascii_lowercase();
    let filter = format!("hive_agent={level},hive_agent_client={level},warn");

    let log_dir = hive_agent_client::config::config_dir()
        .map(|d| d.join("logs"))
        .unwrap_or_else(|| std::path::PathBuf::from("logs"));
    let file_appender = tracing_appender::rolling::daily(&log_dir, "hive-agent.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    use tracing_subscriber::prelude::*;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .with_filter(tracing_subscriber::EnvFilter::new(&filter)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_filter(tracing_subscriber::EnvFilter::new(
                    "hive_agent=debug,hive_agent_client=debug,info",
                )),
        )
        .init();

    // Resolve connection settings: config file, env, then --server
    let mut config = hive_agent_client::load_config()?;
    if let Some(server) = cli.server {
        config.server = server;
    }

    let ctx = commands::Context {
        config,
        json_output: cli.json,
        verbose: cli.verbose,
    };

    match cli.command {
        Commands::Chat(args) => chat::run(args, &ctx).await,
        Commands::History(args) => history::run(args, &ctx).await,
        Commands::Entry(args) => entry::run(args, &ctx).await,
        Commands::Table(args) => table::run(args, &ctx).await,
        Commands::Files(args) => files::run(args, &ctx).await,
        Commands::Tools(args) => tools::run(args, &ctx).await,
        Commands::Prompts => prompts::run(&ctx).await,
    }
}
