//! CLI command handlers.

pub mod chat;
pub mod entry;
pub mod files;
pub mod history;
pub mod prompts;
pub mod table;
pub mod tools;

use anyhow::{Context as _, Result};
use console::Style;
use hive_agent_client::{ClientConfig, HiveAgentClient};

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Resolved connection settings.
    pub config: ClientConfig,
    /// Output as JSON for scripting.
    pub json_output: bool,
    /// Verbose output enabled.
    pub verbose: bool,
}

impl Context {
    /// Build a client for the configured agent.
    pub fn client(&self) -> Result<HiveAgentClient> {
        if self.verbose {
            let dim = Style::new().dim();
            eprintln!("{}", dim.apply_to(format!("Agent: {}", self.config.server)));
        }
        HiveAgentClient::from_config(&self.config)
            .with_context(|| format!("invalid agent URL '{}'", self.config.server))
    }

    /// Print a JSON value, pretty in both modes.
    pub fn print_json(&self, value: &impl serde::Serialize) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    /// Print a server message, or the raw JSON in `--json` mode.
    pub fn print_message(&self, value: &impl serde::Serialize, message: &str) -> Result<()> {
        if self.json_output {
            self.print_json(value)
        } else {
            let green = Style::new().green();
            println!("{} {}", green.apply_to("✓"), message);
            Ok(())
        }
    }
}

/// Parse a JSON command-line argument.
pub fn parse_json(raw: &str) -> Result<serde_json::Value> {
    serde_json::from_str(raw).with_context(|| format!("not valid JSON: {raw}"))
}
