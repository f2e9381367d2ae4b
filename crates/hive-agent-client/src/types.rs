//! Request and response types for the Hive Agent API.
//!
//! These types mirror the agent's API contract. Entries and table rows are
//! schemaless and travel as plain JSON.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Common
// ─────────────────────────────────────────────────────────────────────────────

/// A schemaless JSON document stored in a namespace.
pub type Entry = serde_json::Value;

/// All entries of a namespace, in whatever shape the server returns them
/// (typically a JSON array of entries).
pub type EntryList = serde_json::Value;

/// A table row, keyed by column name.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Generic acknowledgement carrying a human-readable message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message from the server.
    pub message: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Chat
// ─────────────────────────────────────────────────────────────────────────────

/// Role of a chat message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

/// A single message in a chat payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Sender role.
    pub role: Role,
    /// Message text.
    pub content: String,
}

impl ChatMessage {
    /// A message from the user.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// JSON body sent to the chat endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatData {
    /// Conversation messages.
    pub messages: Vec<ChatMessage>,
}

impl ChatData {
    /// Payload holding a single user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::user(content)],
        }
    }
}

/// A file attached to a chat message.
#[derive(Debug, Clone)]
pub enum Attachment {
    /// A file on the local filesystem.
    Path(PathBuf),
    /// In-memory contents.
    Bytes {
        /// File name reported to the server.
        file_name: String,
        /// MIME type; guessed from the file name when absent.
        mime_type: Option<String>,
        /// File contents.
        data: Vec<u8>,
    },
}

impl From<PathBuf> for Attachment {
    fn from(path: PathBuf) -> Self {
        Attachment::Path(path)
    }
}

impl From<&str> for Attachment {
    fn from(path: &str) -> Self {
        Attachment::Path(PathBuf::from(path))
    }
}

/// Chat request scoped to a user session, optionally carrying attachments.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// User ID.
    pub user_id: String,
    /// Session ID.
    pub session_id: String,
    /// Message text.
    pub content: String,
    /// Attached files.
    pub files: Vec<Attachment>,
}

impl ChatRequest {
    /// Create a request without attachments.
    pub fn new(
        user_id: impl Into<String>,
        session_id: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            session_id: session_id.into(),
            content: content.into(),
            files: Vec::new(),
        }
    }

    /// Attach a file.
    pub fn with_file(mut self, file: impl Into<Attachment>) -> Self {
        self.files.push(file.into());
        self
    }
}

/// A stored chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatHistoryMessage {
    /// Owning user, when the server includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Owning session, when the server includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// Message text.
    pub message: String,
    /// Sender role as reported by the server (casing varies).
    pub role: String,
    /// Timestamp (ISO 8601).
    pub timestamp: String,
}

/// All chat sessions of a user, keyed by session ID.
pub type AllChats = HashMap<String, Vec<ChatHistoryMessage>>;

// ─────────────────────────────────────────────────────────────────────────────
// Tables
// ─────────────────────────────────────────────────────────────────────────────

/// Request to create a table.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct CreateTableRequest<'a> {
    pub table_name: &'a str,
    pub columns: &'a BTreeMap<String, String>,
}

/// Request to insert a row.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct InsertDataRequest<'a, T: ?Sized> {
    pub table_name: &'a str,
    pub data: &'a T,
}

/// Request to read rows.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ReadDataRequest<'a> {
    pub table_name: &'a str,
    pub filters: Option<&'a ReadFilters>,
}

/// Request to update a row.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct UpdateDataRequest<'a, T: ?Sized> {
    pub table_name: &'a str,
    pub id: i64,
    pub data: &'a T,
}

/// Request to delete a row.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct DeleteDataRequest<'a> {
    pub table_name: &'a str,
    pub id: i64,
}

/// Row filters: column name to the accepted values.
pub type ReadFilters = BTreeMap<String, Vec<serde_json::Value>>;

/// Response for an inserted row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertDataResponse {
    /// Message from the server.
    pub message: String,
    /// ID of the new row.
    pub id: i64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Files
// ─────────────────────────────────────────────────────────────────────────────

/// Response for uploaded files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadFilesResponse {
    /// Names the files were stored under.
    pub filenames: Vec<String>,
}

/// Response listing stored files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileListResponse {
    /// Stored file names.
    pub files: Vec<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tools
// ─────────────────────────────────────────────────────────────────────────────

/// A tool repository to install on the agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSpec {
    /// Git URL of the tool repository.
    pub url: String,
    /// Paths to the functions to expose from the repository.
    pub functions: Vec<String>,
}

impl ToolSpec {
    /// Create a tool spec.
    pub fn new(url: impl Into<String>, functions: Vec<String>) -> Self {
        Self {
            url: url.into(),
            functions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chat_data_shape() {
        let value = serde_json::to_value(ChatData::user("Hello")).unwrap();
        assert_eq!(
            value,
            json!({"messages": [{"role": "user", "content": "Hello"}]})
        );
    }

    #[test]
    fn test_history_message_tolerates_missing_ids() {
        let msg: ChatHistoryMessage = serde_json::from_value(json!({
            "message": "Hello in session1",
            "role": "USER",
            "timestamp": "2023-01-01T00:00:00Z"
        }))
        .unwrap();
        assert!(msg.user_id.is_none());
        assert_eq!(msg.role, "USER");
    }

    #[test]
    fn test_read_request_serializes_null_filters() {
        let request = ReadDataRequest {
            table_name: "people",
            filters: None,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"table_name": "people", "filters": null})
        );
    }

    #[test]
    fn test_chat_request_builder() {
        let request = ChatRequest::new("u1", "s1", "look")
            .with_file("notes.txt")
            .with_file(Attachment::Bytes {
                file_name: "raw.bin".to_string(),
                mime_type: None,
                data: vec![1, 2, 3],
            });
        assert_eq!(request.files.len(), 2);
        assert!(matches!(&request.files[0], Attachment::Path(p) if p.ends_with("notes.txt")));
    }
}
