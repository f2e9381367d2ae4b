//! Files API.

use std::path::Path;

use reqwest::multipart::Form;

use crate::client::{segment, HiveAgentClient};
use crate::error::{Error, Result};
use crate::types::{FileListResponse, MessageResponse, UploadFilesResponse};

use super::{file_part, FILES_FIELD};

/// Files API client.
pub struct FilesApi {
    client: HiveAgentClient,
}

impl FilesApi {
    pub(crate) fn new(client: HiveAgentClient) -> Self {
        Self { client }
    }

    /// Upload local files. Each file is stored under its base name.
    pub async fn upload<P: AsRef<Path>>(&self, paths: &[P]) -> Result<UploadFilesResponse> {
        if paths.is_empty() {
            return Err(Error::InvalidInput("No files to upload".to_string()));
        }

        let mut form = Form::new();
        for path in paths {
            form = form.part(FILES_FIELD, file_part(path.as_ref()).await?);
        }

        let response = self
            .client
            .post_multipart(&["uploadfiles", ""], form)
            .await
            .inspect_err(|e| tracing::error!(count = paths.len(), error = %e, "Failed to upload files"))?;
        let uploaded: UploadFilesResponse = response.json().await?;
        tracing::debug!(filenames = ?uploaded.filenames, "Uploaded files");
        Ok(uploaded)
    }

    /// List stored files.
    pub async fn list(&self) -> Result<FileListResponse> {
        self.client
            .get(&["files", ""])
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to list files"))
    }

    /// Delete a stored file.
    pub async fn delete(&self, filename: &str) -> Result<MessageResponse> {
        let filename = segment("file name", filename)?;
        self.client
            .delete(&["files", filename])
            .await
            .inspect_err(|e| tracing::error!(filename, error = %e, "Failed to delete file"))
    }

    /// Rename a stored file.
    pub async fn rename(&self, old_filename: &str, new_filename: &str) -> Result<MessageResponse> {
        let old = segment("file name", old_filename)?;
        let new = segment("new file name", new_filename)?;
        self.client
            .put_empty(&["files", old, new])
            .await
            .inspect_err(|e| {
                tracing::error!(old_filename, new_filename, error = %e, "Failed to rename file")
            })
    }
}
