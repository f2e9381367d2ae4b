//! Database tables API.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::client::HiveAgentClient;
use crate::error::Result;
use crate::types::{
    CreateTableRequest, DeleteDataRequest, InsertDataRequest, InsertDataResponse, MessageResponse,
    ReadDataRequest, ReadFilters, Row, UpdateDataRequest,
};

/// Database tables API client.
pub struct TablesApi {
    client: HiveAgentClient,
}

impl TablesApi {
    pub(crate) fn new(client: HiveAgentClient) -> Self {
        Self { client }
    }

    /// Create a table from a map of column name to column type.
    pub async fn create(
        &self,
        table_name: &str,
        columns: &BTreeMap<String, String>,
    ) -> Result<MessageResponse> {
        self.client
            .post(
                &["database", "create-table"],
                &CreateTableRequest {
                    table_name,
                    columns,
                },
            )
            .await
            .inspect_err(|e| tracing::error!(table_name, error = %e, "Failed to create table"))
    }

    /// Insert a row.
    pub async fn insert<T>(&self, table_name: &str, data: &T) -> Result<InsertDataResponse>
    where
        T: Serialize + ?Sized,
    {
        let response: InsertDataResponse = self
            .client
            .post(
                &["database", "insert-data"],
                &InsertDataRequest { table_name, data },
            )
            .await
            .inspect_err(|e| tracing::error!(table_name, error = %e, "Failed to insert data"))?;
        tracing::debug!(table_name, id = response.id, "Inserted row");
        Ok(response)
    }

    /// Read rows, optionally filtered by column values.
    pub async fn read(&self, table_name: &str, filters: Option<&ReadFilters>) -> Result<Vec<Row>> {
        self.client
            .post(
                &["database", "read-data"],
                &ReadDataRequest {
                    table_name,
                    filters,
                },
            )
            .await
            .inspect_err(|e| tracing::error!(table_name, error = %e, "Failed to read data"))
    }

    /// Update a row by ID.
    pub async fn update<T>(&self, table_name: &str, row_id: i64, data: &T) -> Result<MessageResponse>
    where
        T: Serialize + ?Sized,
    {
        self.client
            .put(
                &["database", "update-data"],
                &UpdateDataRequest {
                    table_name,
                    id: row_id,
                    data,
                },
            )
            .await
            .inspect_err(|e| {
                tracing::error!(table_name, row_id, error = %e, "Failed to update data")
            })
    }

    /// Delete a row by ID.
    pub async fn delete(&self, table_name: &str, row_id: i64) -> Result<MessageResponse> {
        self.client
            .delete_with_body(
                &["database", "delete-data"],
                &DeleteDataRequest {
                    table_name,
                    id: row_id,
                },
            )
            .await
            .inspect_err(|e| {
                tracing::error!(table_name, row_id, error = %e, "Failed to delete data")
            })
    }
}
