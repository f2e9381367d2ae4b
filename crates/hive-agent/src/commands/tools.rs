//! Tools command - install tool repositories on the agent.

use anyhow::Result;
use clap::{Args, Subcommand};
use hive_agent_client::ToolSpec;

use super::Context;

/// Arguments for the tools command.
#[derive(Args, Debug)]
pub struct ToolsArgs {
    #[command(subcommand)]
    pub command: ToolsCommand,
}

#[derive(Subcommand, Debug)]
pub enum ToolsCommand {
    /// Install functions from a git repository
    Install {
        /// Git URL of the tool repository
        #[arg(long)]
        url: String,

        /// Path to a function in the repository (repeatable)
        #[arg(short, long = "function", required = true)]
        functions: Vec<String>,
    },
}

/// Run the tools command.
pub async fn run(args: ToolsArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;

    match args.command {
        ToolsCommand::Install { url, functions } => {
            let count = functions.len();
            let response = client
                .tools()
                .install(&[ToolSpec::new(url.clone(), functions)])
                .await?;
            let message = format!("Installed {} function(s) from {}", count, url);
            ctx.print_message(&response, &message)?;
        }
    }
    Ok(())
}
