//! Files command - stored file management.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use console::{Style, style};

use super::Context;

/// Arguments for the files command.
#[derive(Args, Debug)]
pub struct FilesArgs {
    #[command(subcommand)]
    pub command: FilesCommand,
}

#[derive(Subcommand, Debug)]
pub enum FilesCommand {
    /// Upload one or more local files
    Upload {
        /// Files to upload
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// List stored files
    List,

    /// Delete a stored file
    Delete {
        /// Stored file name
        name: String,
    },

    /// Rename a stored file
    Rename {
        /// Current name
        old: String,

        /// New name
        new: String,
    },
}

/// Run the files command.
pub async fn run(args: FilesArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let files = client.files();
    let dim = Style::new().dim();

    match args.command {
        FilesCommand::Upload { paths } => {
            let response = files.upload(&paths).await?;
            if ctx.json_output {
                return ctx.print_json(&response);
            }
            let green = Style::new().green();
            for name in &response.filenames {
                println!("{} Uploaded {}", green.apply_to("✓"), name);
            }
        }
        FilesCommand::List => {
            let listing = files.list().await?;
            if ctx.json_output {
                return ctx.print_json(&listing);
            }
            println!("{}", style("Files").bold());
            println!("{}", dim.apply_to("─".repeat(50)));
            if listing.files.is_empty() {
                println!("{}", dim.apply_to("No files found"));
            }
            for name in &listing.files {
                println!("  {}", name);
            }
        }
        FilesCommand::Delete { name } => {
            let response = files.delete(&name).await?;
            ctx.print_message(&response, &response.message)?;
        }
        FilesCommand::Rename { old, new } => {
            let response = files.rename(&old, &new).await?;
            ctx.print_message(&response, &response.message)?;
        }
    }
    Ok(())
}
