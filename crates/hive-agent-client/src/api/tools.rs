//! Tools API.

use crate::client::HiveAgentClient;
use crate::error::{Error, Result};
use crate::types::ToolSpec;

/// Tools API client.
pub struct ToolsApi {
    client: HiveAgentClient,
}

impl ToolsApi {
    pub(crate) fn new(client: HiveAgentClient) -> Self {
        Self { client }
    }

    /// Install tool repositories on the agent.
    pub async fn install(&self, tools: &[ToolSpec]) -> Result<serde_json::Value> {
        if tools.is_empty() {
            return Err(Error::InvalidInput("No tools to install".to_string()));
        }

        let response: serde_json::Value = self
            .client
            .post(&["install_tools"], tools)
            .await
            .inspect_err(|e| tracing::error!(count = tools.len(), error = %e, "Failed to install tools"))?;
        tracing::debug!(%response, "Installed tools");
        Ok(response)
    }
}
