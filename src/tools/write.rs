//! Write operation tools.
//!
//! This module implements the `create_table_records`, `update_table_records`,
//! and `delete_table_records` MCP tools. Update and delete require at least
//! one filter: an empty filter set would silently apply to the entire table,
//! so it is rejected before any backend call. Read has no such requirement -
//! the asymmetry is a safety rule, not an oversight.

use crate::backend::TableBackend;
use crate::error::TableResult;
use crate::models::{
    Records, Row, normalize_filters, require_filters, validate_record, validate_table_name,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Input for the create_table_records tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateRecordsInput {
    /// Name of the table to insert records into
    pub table_name: String,
    /// A single record (column-value map) or a non-empty list of records
    pub records: Records,
}

/// Input for the update_table_records tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateRecordsInput {
    /// Name of the table to update records in
    pub table_name: String,
    /// Column-value pairs with the new values
    pub updates: Row,
    /// Column-value equality constraints selecting which rows to update. At least one is required.
    pub filters: Row,
}

/// Input for the delete_table_records tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DeleteRecordsInput {
    /// Name of the table to delete records from
    pub table_name: String,
    /// Column-value equality constraints selecting which rows to delete. At least one is required.
    pub filters: Row,
}

/// Output from the write tools: the rows the backend reports as affected.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct WriteOutput {
    /// Affected rows as returned by the backend, including backend-assigned
    /// fields such as generated identifiers
    pub rows: Vec<Row>,
    /// Number of affected rows
    pub row_count: usize,
}

impl WriteOutput {
    fn from_rows(rows: Vec<Row>) -> Self {
        let row_count = rows.len();
        Self { rows, row_count }
    }
}

/// Handler for the three write tools.
pub struct WriteToolHandler {
    backend: Arc<dyn TableBackend>,
}

impl WriteToolHandler {
    /// Create a new write tool handler.
    pub fn new(backend: Arc<dyn TableBackend>) -> Self {
        Self { backend }
    }

    /// Handle a create_table_records call.
    ///
    /// The payload is normalized to list form before dispatch, so a single
    /// record and a one-element list produce identical backend calls. The
    /// insert is all-or-nothing: one backend statement per tool call, and a
    /// constraint violation fails the whole batch.
    pub async fn create_records(&self, input: CreateRecordsInput) -> TableResult<WriteOutput> {
        let table = validate_table_name(&input.table_name)?;
        let records = input.records.into_rows()?;

        let rows = self.backend.insert(table, &records).await?;

        info!(
            table = table,
            record_count = records.len(),
            row_count = rows.len(),
            "Created records"
        );

        Ok(WriteOutput::from_rows(rows))
    }

    /// Handle an update_table_records call. Requires a non-empty patch and
    /// at least one filter.
    pub async fn update_records(&self, input: UpdateRecordsInput) -> TableResult<WriteOutput> {
        let table = validate_table_name(&input.table_name)?;
        validate_record(&input.updates, "updates")?;
        let filters = normalize_filters(Some(&input.filters))?;
        require_filters(&filters, "update_table_records")?;

        let rows = self.backend.update(table, &input.updates, &filters).await?;

        info!(table = table, row_count = rows.len(), "Updated records");

        Ok(WriteOutput::from_rows(rows))
    }

    /// Handle a delete_table_records call. Requires at least one filter.
    pub async fn delete_records(&self, input: DeleteRecordsInput) -> TableResult<WriteOutput> {
        let table = validate_table_name(&input.table_name)?;
        let filters = normalize_filters(Some(&input.filters))?;
        require_filters(&filters, "delete_table_records")?;

        let rows = self.backend.delete(table, &filters).await?;

        info!(table = table, row_count = rows.len(), "Deleted records");

        Ok(WriteOutput::from_rows(rows))
    }
}
