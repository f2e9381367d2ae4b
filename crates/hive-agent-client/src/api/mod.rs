//! API endpoint implementations.

mod chat;
mod entries;
mod files;
mod prompts;
mod tables;
mod tools;

pub use chat::ChatApi;
pub use entries::{EntriesApi, EntryStream};
pub use files::FilesApi;
pub use prompts::PromptsApi;
pub use tables::TablesApi;
pub use tools::ToolsApi;

use std::path::Path;

use reqwest::multipart::Part;
use reqwest::Body;

use crate::error::Result;
use crate::types::Attachment;

/// Multipart field name the agent expects uploads under.
pub(crate) const FILES_FIELD: &str = "files";

/// Build a multipart part for an attachment.
pub(crate) async fn attachment_part(attachment: &Attachment) -> Result<Part> {
    match attachment {
        Attachment::Path(path) => file_part(path).await,
        Attachment::Bytes {
            file_name,
            mime_type,
            data,
        } => {
            let mime = mime_type
                .as_deref()
                .unwrap_or_else(|| guess_mime(Path::new(file_name)));
            Ok(Part::bytes(data.clone())
                .file_name(file_name.clone())
                .mime_str(mime)?)
        }
    }
}

/// Open a file as a streamed multipart part named after its base name.
///
/// The file is opened up front so a missing path fails before any request.
pub(crate) async fn file_part(path: &Path) -> Result<Part> {
    let file = tokio::fs::File::open(path).await.inspect_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "Failed to open file for upload");
    })?;
    let len = file.metadata().await?.len();
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());

    Ok(Part::stream_with_length(Body::from(file), len)
        .file_name(file_name)
        .mime_str(guess_mime(path))?)
}

/// Guess a MIME type from a file extension.
pub(crate) fn guess_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("txt") | Some("log") => "text/plain",
        Some("md") => "text/markdown",
        Some("csv") => "text/csv",
        Some("html") | Some("htm") => "text/html",
        Some("json") => "application/json",
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        Some("xls") => "application/vnd.ms-excel",
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("mp4") => "video/mp4",
        _ => "application/octet-stream",
    }
}
