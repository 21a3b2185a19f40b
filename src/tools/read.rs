//! Read tool.
//!
//! This module implements the `read_table_rows` MCP tool. An absent filter
//! set matches all rows; limit and offset are forwarded to the backend
//! unchanged, deferring to its default page size when unset.

use crate::backend::TableBackend;
use crate::error::TableResult;
use crate::models::{
    OrderBy, Row, SelectQuery, normalize_filters, validate_columns, validate_table_name,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Default value for the ascending field.
fn default_ascending() -> bool {
    true
}

/// Input for the read_table_rows tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ReadRowsInput {
    /// Name of the table to read from
    pub table_name: String,
    /// Columns to select. Omit for all columns.
    #[serde(default)]
    pub columns: Option<Vec<String>>,
    /// Column-value pairs interpreted as equality constraints (all must match). Omit to match all rows.
    #[serde(default)]
    pub filters: Option<Row>,
    /// Column to order results by
    #[serde(default)]
    pub order_by: Option<String>,
    /// Sort ascending (default: true). Only used with order_by.
    #[serde(default = "default_ascending")]
    pub ascending: bool,
    /// Maximum number of rows to return. Backend default when omitted.
    #[serde(default)]
    pub limit: Option<u32>,
    /// Number of rows to skip. Backend default when omitted.
    #[serde(default)]
    pub offset: Option<u32>,
}

/// Output from the read_table_rows tool.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ReadRowsOutput {
    /// Result rows as column-value maps
    pub rows: Vec<Row>,
    /// Number of rows returned
    pub row_count: usize,
}

/// Handler for the read tool.
pub struct ReadToolHandler {
    backend: Arc<dyn TableBackend>,
}

impl ReadToolHandler {
    /// Create a new read tool handler.
    pub fn new(backend: Arc<dyn TableBackend>) -> Self {
        Self { backend }
    }

    /// Handle a read_table_rows call: validate and normalize the inputs,
    /// compose a single select call, and wrap the returned rows.
    pub async fn read_rows(&self, input: ReadRowsInput) -> TableResult<ReadRowsOutput> {
        let table = validate_table_name(&input.table_name)?;
        let filters = normalize_filters(input.filters.as_ref())?;

        let mut query = SelectQuery::new().with_filters(filters);
        if let Some(columns) = input.columns {
            validate_columns(&columns)?;
            query = query.with_columns(columns);
        }
        if let Some(order_by) = input.order_by {
            query = query.with_order(OrderBy::new(order_by, input.ascending));
        }
        if let Some(limit) = input.limit {
            query = query.with_limit(limit);
        }
        if let Some(offset) = input.offset {
            query = query.with_offset(offset);
        }

        let rows = self.backend.select(table, &query).await?;
        let row_count = rows.len();

        info!(table = table, row_count = row_count, "Read rows");

        Ok(ReadRowsOutput { rows, row_count })
    }
}
