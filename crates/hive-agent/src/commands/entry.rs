//! Entry command - namespaced entry management.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};
use console::Style;
use futures::StreamExt;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use super::{Context, parse_json};

/// Arguments for the entry command.
#[derive(Args, Debug)]
pub struct EntryArgs {
    #[command(subcommand)]
    pub command: EntryCommand,
}

#[derive(Subcommand, Debug)]
pub enum EntryCommand {
    /// Create an entry from a JSON document
    Create {
        /// Namespace to create the entry in
        namespace: String,

        /// Entry data as JSON
        data: String,
    },

    /// List every entry in a namespace
    List {
        /// Namespace
        namespace: String,
    },

    /// Show a single entry
    Get {
        /// Namespace
        namespace: String,

        /// Entry ID
        id: String,
    },

    /// Replace an entry's data
    Update {
        /// Namespace
        namespace: String,

        /// Entry ID
        id: String,

        /// New entry data as JSON
        data: String,
    },

    /// Delete an entry
    Delete {
        /// Namespace
        namespace: String,

        /// Entry ID
        id: String,
    },

    /// Stream newline-delimited JSON into a namespace
    Stream {
        /// Namespace
        namespace: String,

        /// Read chunks from a file instead of stdin
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

/// Run the entry command.
pub async fn run(args: EntryArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let entries = client.entries();

    match args.command {
        EntryCommand::Create { namespace, data } => {
            let entry = entries.create(&namespace, &parse_json(&data)?).await?;
            ctx.print_json(&entry)?;
        }
        EntryCommand::List { namespace } => {
            let listing = entries.list(&namespace).await?;
            ctx.print_json(&listing)?;
        }
        EntryCommand::Get { namespace, id } => {
            let entry = entries.get(&namespace, &id).await?;
            ctx.print_json(&entry)?;
        }
        EntryCommand::Update {
            namespace,
            id,
            data,
        } => {
            let entry = entries.update(&namespace, &id, &parse_json(&data)?).await?;
            ctx.print_json(&entry)?;
        }
        EntryCommand::Delete { namespace, id } => {
            let response = entries.delete(&namespace, &id).await?;
            ctx.print_message(&response, &response.message)?;
        }
        EntryCommand::Stream { namespace, input } => {
            let reader: Box<dyn AsyncBufRead + Send + Unpin> = match &input {
                Some(path) => {
                    let file = tokio::fs::File::open(path)
                        .await
                        .with_context(|| format!("failed to open {}", path.display()))?;
                    Box::new(BufReader::new(file))
                }
                None => Box::new(BufReader::new(tokio::io::stdin())),
            };

            // Lines are parsed as they arrive so a live producer is streamed
            // chunk by chunk; the reader task reports any parse error.
            let (tx, mut rx) = mpsc::channel(CHUNK_BUFFER);
            let reader = tokio::spawn(read_ndjson(reader, tx));
            let chunks = async_stream::stream! {
                while let Some(chunk) = rx.recv().await {
                    yield chunk;
                }
            };

            let mut acks = entries.stream(&namespace, chunks).await?;
            let dim = Style::new().dim();
            let mut received = 0usize;
            while let Some(ack) = acks.next().await {
                let ack = ack?;
                received += 1;
                if ctx.json_output {
                    println!("{}", serde_json::to_string(&ack)?);
                } else {
                    println!("{} {}", dim.apply_to(format!("[{}]", received)), ack);
                }
            }
            reader.await??;

            if !ctx.json_output {
                let green = Style::new().green();
                println!(
                    "{} Streamed {} chunk(s) into '{}'",
                    green.apply_to("✓"),
                    received,
                    namespace
                );
            }
        }
    }
    Ok(())
}

/// Chunks parsed ahead of the socket.
const CHUNK_BUFFER: usize = 16;

/// Parse one JSON document per non-blank line and forward it to `tx`.
///
/// Stops early once the receiving side is gone.
async fn read_ndjson<R>(reader: R, tx: mpsc::Sender<serde_json::Value>) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut n = 0usize;
    while let Some(line) = lines.next_line().await? {
        n += 1;
        if line.trim().is_empty() {
            continue;
        }
        let chunk = serde_json::from_str(&line)
            .with_context(|| format!("line {}: not valid JSON", n))?;
        if tx.send(chunk).await.is_err() {
            break;
        }
    }
    Ok(())
}
