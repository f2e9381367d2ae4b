//! Chat command - send a message to the agent.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use super::Context;
use hive_agent_client::ChatRequest;

/// Arguments for the chat command.
#[derive(Args, Debug)]
pub struct ChatArgs {
    /// The message to send
    #[arg(required = true)]
    pub content: String,

    /// User ID (enables session chat)
    #[arg(short, long, requires = "session")]
    pub user: Option<String>,

    /// Session ID
    #[arg(short, long, requires = "user")]
    pub session: Option<String>,

    /// Attach a file (repeatable, requires --user/--session)
    #[arg(short, long = "file", requires = "user")]
    pub files: Vec<PathBuf>,
}

/// Run the chat command.
pub async fn run(args: ChatArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;

    let reply = match (args.user, args.session) {
        (Some(user), Some(session)) => {
            let mut request = ChatRequest::new(user, session, args.content);
            for file in args.files {
                request = request.with_file(file);
            }
            client.chat().send(request).await?
        }
        _ => client.chat().message(args.content).await?,
    };

    if ctx.json_output {
        ctx.print_json(&serde_json::json!({ "response": reply }))?;
    } else {
        println!("{}", reply);
    }
    Ok(())
}
