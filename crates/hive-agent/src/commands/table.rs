//! Table command - agent database management.

use std::collections::BTreeMap;

use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use console::{Style, style};
use hive_agent_client::{ReadFilters, Row};

use super::{Context, parse_json};

/// Arguments for the table command.
#[derive(Args, Debug)]
pub struct TableArgs {
    #[command(subcommand)]
    pub command: TableCommand,
}

#[derive(Subcommand, Debug)]
pub enum TableCommand {
    /// Create a table
    Create {
        /// Table name
        table: String,

        /// Column definition as name:type (repeatable)
        #[arg(short, long = "column", required = true)]
        columns: Vec<String>,
    },

    /// Insert a row from a JSON object
    Insert {
        /// Table name
        table: String,

        /// Row data as JSON
        data: String,
    },

    /// Read rows, optionally filtered
    Read {
        /// Table name
        table: String,

        /// Filter as column=value (repeatable; values for one column are OR-ed)
        #[arg(short, long = "filter")]
        filters: Vec<String>,
    },

    /// Update a row
    Update {
        /// Table name
        table: String,

        /// Row ID
        id: i64,

        /// New values as JSON
        data: String,
    },

    /// Delete a row
    Delete {
        /// Table name
        table: String,

        /// Row ID
        id: i64,
    },
}

/// Run the table command.
pub async fn run(args: TableArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let tables = client.tables();

    match args.command {
        TableCommand::Create { table, columns } => {
            let columns = parse_columns(&columns)?;
            let response = tables.create(&table, &columns).await?;
            ctx.print_message(&response, &response.message)?;
        }
        TableCommand::Insert { table, data } => {
            let response = tables.insert(&table, &parse_json(&data)?).await?;
            let message = format!("{} (id {})", response.message, response.id);
            ctx.print_message(&response, &message)?;
        }
        TableCommand::Read { table, filters } => {
            let filters = parse_filters(&filters)?;
            let filters = (!filters.is_empty()).then_some(&filters);
            let rows = tables.read(&table, filters).await?;
            if ctx.json_output {
                ctx.print_json(&rows)?;
            } else {
                print_rows(&table, &rows)?;
            }
        }
        TableCommand::Update { table, id, data } => {
            let response = tables.update(&table, id, &parse_json(&data)?).await?;
            ctx.print_message(&response, &response.message)?;
        }
        TableCommand::Delete { table, id } => {
            let response = tables.delete(&table, id).await?;
            ctx.print_message(&response, &response.message)?;
        }
    }
    Ok(())
}

fn print_rows(table: &str, rows: &[Row]) -> Result<()> {
    let dim = Style::new().dim();
    println!("{}", style(format!("Table {}", table)).bold());
    println!("{}", dim.apply_to("─".repeat(50)));
    if rows.is_empty() {
        println!("{}", dim.apply_to("No rows found"));
    }
    for row in rows {
        println!("{}", serde_json::to_string(row)?);
    }
    Ok(())
}

/// Parse `name:type` column definitions.
fn parse_columns(raw: &[String]) -> Result<BTreeMap<String, String>> {
    let mut columns = BTreeMap::new();
    for def in raw {
        let Some((name, ty)) = def.split_once(':') else {
            bail!("column must be name:type, got '{def}'");
        };
        let (name, ty) = (name.trim(), ty.trim());
        if name.is_empty() || ty.is_empty() {
            bail!("column must be name:type, got '{def}'");
        }
        columns.insert(name.to_string(), ty.to_string());
    }
    Ok(columns)
}

/// Parse `column=value` filters. Values are read as JSON, falling back to a
/// plain string.
fn parse_filters(raw: &[String]) -> Result<ReadFilters> {
    let mut filters = ReadFilters::new();
    for filter in raw {
        let Some((column, value)) = filter.split_once('=') else {
            bail!("filter must be column=value, got '{filter}'");
        };
        let value = serde_json::from_str(value)
            .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
        filters.entry(column.trim().to_string()).or_default().push(value);
    }
    Ok(filters)
}
