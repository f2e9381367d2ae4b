//! Prompts command - list the agent's sample prompts.

use anyhow::Result;
use console::style;

use super::Context;

/// Run the prompts command.
pub async fn run(ctx: &Context) -> Result<()> {
    let prompts = ctx.client()?.prompts().list().await?;

    if ctx.json_output {
        return ctx.print_json(&prompts);
    }

    match prompts.as_array() {
        Some(items) => {
            println!("{}", style("Sample prompts").bold());
            for item in items {
                match item.as_str() {
                    Some(text) => println!("  • {}", text),
                    None => println!("  • {}", item),
                }
            }
        }
        None => ctx.print_json(&prompts)?,
    }
    Ok(())
}
