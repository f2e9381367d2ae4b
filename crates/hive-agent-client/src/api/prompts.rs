//! Sample prompts API.

use crate::client::HiveAgentClient;
use crate::error::Result;

/// Sample prompts API client.
pub struct PromptsApi {
    client: HiveAgentClient,
}

impl PromptsApi {
    pub(crate) fn new(client: HiveAgentClient) -> Self {
        Self { client }
    }

    /// Suggested prompts for starting a conversation with the agent.
    pub async fn list(&self) -> Result<serde_json::Value> {
        self.client
            .get(&["sample_prompts", ""])
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to get sample prompts"))
    }
}
