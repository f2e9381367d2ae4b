//! HTTP client SDK for the Hive Agent API.
//!
//! This crate provides a typed async client for a running Hive Agent.
//!
//! # Example
//!
//! ```no_run
//! use hive_agent_client::{HiveAgentClient, Result};
//! use serde_json::json;
//!
//! # async fn example() -> Result<()> {
//! let client = HiveAgentClient::new("http://localhost:8000")?;
//!
//! // Chat with the agent
//! let reply = client.chat().message("What can you do?").await?;
//! println!("Agent: {}", reply);
//!
//! // Store and read back an entry
//! let entry = client.entries().create("notes", &json!({"text": "hello"})).await?;
//! let all = client.entries().list("notes").await?;
//!
//! // Stream readings into a namespace, one acknowledgement per chunk
//! use futures::StreamExt;
//! let readings = futures::stream::iter((0..3).map(|i| json!({"reading": i})));
//! let mut acks = client.entries().stream("sensors", readings).await?;
//! while let Some(ack) = acks.next().await {
//!     println!("ack: {}", ack?);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # API Coverage
//!
//! - **Chat**: Plain and session-scoped messages with attachments, history
//! - **Entries**: CRUD on namespaced JSON entries, WebSocket streaming
//! - **Tables**: Create tables, insert/read/update/delete rows
//! - **Files**: Upload, list, rename, delete
//! - **Tools**: Install tool repositories
//! - **Prompts**: Sample prompts

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::{ClientBuilder, HiveAgentClient};
pub use config::{load_config, load_config_from, ClientConfig};
pub use error::{Error, Result};
pub use types::*;

pub use api::EntryStream;
