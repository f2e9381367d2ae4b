//! Chat API.

use reqwest::multipart::Form;

use crate::client::HiveAgentClient;
use crate::error::{Error, Result};
use crate::types::{AllChats, ChatData, ChatHistoryMessage, ChatRequest};

use super::{attachment_part, FILES_FIELD};

/// Chat API client.
pub struct ChatApi {
    client: HiveAgentClient,
}

impl ChatApi {
    pub(crate) fn new(client: HiveAgentClient) -> Self {
        Self { client }
    }

    /// Send a single user message and return the agent's reply text.
    pub async fn message(&self, content: impl Into<String>) -> Result<String> {
        let content = content.into();
        validate_content(&content)?;

        let reply = self
            .client
            .post_text(&["api", "chat"], &ChatData::user(content))
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to send chat message"))?;
        tracing::debug!(reply = %reply, "Chat reply");
        Ok(reply)
    }

    /// Send a message within a user session, uploading any attachments.
    pub async fn send(&self, request: ChatRequest) -> Result<String> {
        validate_content(&request.content)?;

        let chat_data = serde_json::to_string(&ChatData::user(request.content.as_str()))?;
        let mut form = Form::new()
            .text("user_id", request.user_id.clone())
            .text("session_id", request.session_id.clone())
            .text("chat_data", chat_data);
        for file in &request.files {
            form = form.part(FILES_FIELD, attachment_part(file).await?);
        }

        let response = self
            .client
            .post_multipart(&["chat"], form)
            .await
            .inspect_err(|e| {
                tracing::error!(
                    user_id = %request.user_id,
                    session_id = %request.session_id,
                    error = %e,
                    "Failed to send chat message"
                )
            })?;
        let reply = response.text().await?;
        tracing::debug!(session_id = %request.session_id, reply = %reply, "Chat reply");
        Ok(reply)
    }

    /// Fetch the messages of one session.
    pub async fn history(&self, user_id: &str, session_id: &str) -> Result<Vec<ChatHistoryMessage>> {
        self.client
            .get_with_query(
                &["chat_history"],
                &[("user_id", user_id), ("session_id", session_id)],
            )
            .await
            .inspect_err(|e| {
                tracing::error!(user_id, session_id, error = %e, "Failed to fetch chat history")
            })
    }

    /// Fetch every session of a user, keyed by session ID.
    pub async fn all_chats(&self, user_id: &str) -> Result<AllChats> {
        self.client
            .get_with_query(&["all_chats"], &[("user_id", user_id)])
            .await
            .inspect_err(|e| tracing::error!(user_id, error = %e, "Failed to fetch all chats"))
    }
}

fn validate_content(content: &str) -> Result<()> {
    if content.trim().is_empty() {
        return Err(Error::InvalidInput("Content must not be empty".to_string()));
    }
    Ok(())
}
