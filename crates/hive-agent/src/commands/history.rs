//! History command - show stored chat messages.

use anyhow::Result;
use clap::Args;
use console::{Style, style};
use hive_agent_client::ChatHistoryMessage;

use super::Context;

/// Arguments for the history command.
#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// User ID
    #[arg(short, long)]
    pub user: String,

    /// Session ID (omit to show every session)
    #[arg(short, long)]
    pub session: Option<String>,
}

/// Run the history command.
pub async fn run(args: HistoryArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;

    match args.session {
        Some(session) => {
            let messages = client.chat().history(&args.user, &session).await?;
            if ctx.json_output {
                return ctx.print_json(&messages);
            }
            print_session(&session, &messages);
        }
        None => {
            let chats = client.chat().all_chats(&args.user).await?;
            if ctx.json_output {
                return ctx.print_json(&chats);
            }
            if chats.is_empty() {
                println!("{}", Style::new().dim().apply_to("No chats found"));
            }
            let mut sessions: Vec<_> = chats.iter().collect();
            sessions.sort_by(|a, b| a.0.cmp(b.0));
            for (session, messages) in sessions {
                print_session(session, messages);
                println!();
            }
        }
    }
    Ok(())
}

fn print_session(session: &str, messages: &[ChatHistoryMessage]) {
    let dim = Style::new().dim();
    println!("{}", style(format!("Session {}", session)).bold());
    println!("{}", dim.apply_to("─".repeat(50)));
    for msg in messages {
        println!(
            "{} {}: {}",
            dim.apply_to(&msg.timestamp),
            style(msg.role.to_lowercase()).cyan(),
            msg.message
        );
    }
}
