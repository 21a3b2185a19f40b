//! MCP service implementation using rmcp.
//!
//! This module defines the TableService struct with the four table tools
//! exposed via the MCP protocol using the rmcp framework's macros. Malformed
//! call envelopes (unknown tool, type-mismatched arguments) are rejected by
//! the framework before any handler runs.

use crate::backend::TableBackend;
use crate::tools::read::{ReadRowsInput, ReadRowsOutput, ReadToolHandler};
use crate::tools::write::{
    CreateRecordsInput, DeleteRecordsInput, UpdateRecordsInput, WriteOutput, WriteToolHandler,
};
use rmcp::Json;
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct TableService {
    /// Shared backend handle, built once at startup and read-only thereafter
    backend: Arc<dyn TableBackend>,
    /// Tool router for MCP tool dispatch (auto-generated)
    tool_router: ToolRouter<Self>,
}

impl TableService {
    /// Create a new TableService instance.
    ///
    /// # Arguments
    ///
    /// * `backend` - Shared backend handle for all table operations
    pub fn new(backend: Arc<dyn TableBackend>) -> Self {
        Self {
            backend,
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router]
impl TableService {
    #[tool(
        description = "Read rows from a table with optional column projection, equality filters, ordering, and pagination.\nOmit `columns` for all columns. Omit `filters` to match all rows.\nExample: read_table_rows(table_name=\"users\", filters={\"is_active\": true}, limit=10)"
    )]
    async fn read_table_rows(
        &self,
        Parameters(input): Parameters<ReadRowsInput>,
    ) -> Result<Json<ReadRowsOutput>, McpError> {
        let handler = ReadToolHandler::new(self.backend.clone());
        handler
            .read_rows(input)
            .await
            .map(Json)
            .map_err(McpError::from)
    }

    #[tool(
        description = "Create one or multiple records in a table.\n`records` is a single column-value map or a non-empty list of maps (bulk insert, all-or-nothing).\nReturns the created rows including backend-assigned fields such as generated IDs."
    )]
    async fn create_table_records(
        &self,
        Parameters(input): Parameters<CreateRecordsInput>,
    ) -> Result<Json<WriteOutput>, McpError> {
        let handler = WriteToolHandler::new(self.backend.clone());
        handler
            .create_records(input)
            .await
            .map(Json)
            .map_err(McpError::from)
    }

    #[tool(
        description = "Update records in a table that match the equality filters.\n`filters` must contain at least one entry - an empty filter set is rejected to prevent updating every row by omission.\nReturns the updated rows."
    )]
    async fn update_table_records(
        &self,
        Parameters(input): Parameters<UpdateRecordsInput>,
    ) -> Result<Json<WriteOutput>, McpError> {
        let handler = WriteToolHandler::new(self.backend.clone());
        handler
            .update_records(input)
            .await
            .map(Json)
            .map_err(McpError::from)
    }

    #[tool(
        description = "Delete records from a table that match the equality filters.\n`filters` must contain at least one entry - an empty filter set is rejected to prevent deleting every row by omission.\nReturns the deleted rows."
    )]
    async fn delete_table_records(
        &self,
        Parameters(input): Parameters<DeleteRecordsInput>,
    ) -> Result<Json<WriteOutput>, McpError> {
        let handler = WriteToolHandler::new(self.backend.clone());
        handler
            .delete_records(input)
            .await
            .map(Json)
            .map_err(McpError::from)
    }
}

#[tool_handler]
impl ServerHandler for TableService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "supabase-mcp-server".to_owned(),
                title: Some("Supabase MCP Server".to_owned()),
                version: env!("CARGO_PKG_VERSION").to_owned(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Tools for reading and writing table data in a Supabase database.\n\
                \n\
                ## Filters\n\
                All filters are equality constraints: every column-value pair in `filters` must\n\
                match (logical AND). No range, inequality, or IN-style operators are supported.\n\
                \n\
                ## Empty filters: read vs. write\n\
                - `read_table_rows` with no filters returns ALL rows (subject to limit/offset).\n\
                - `update_table_records` and `delete_table_records` REQUIRE at least one filter.\n\
                  An empty filter set is rejected without touching the database, so an entire\n\
                  table can never be modified or deleted by omission.\n\
                \n\
                ## Writes\n\
                - Each write tool call issues exactly one database statement. Bulk creates are\n\
                  all-or-nothing: a constraint violation fails the whole batch.\n\
                - There is no idempotency key: repeating a create call produces a duplicate row\n\
                  if the table permits it.\n\
                \n\
                ## Errors\n\
                Invalid parameters are reported without reaching the database. Database errors\n\
                (unknown table or column, constraint violations) carry the backend's message and\n\
                error code. Nothing is retried automatically."
                    .to_string(),
            ),
        }
    }
}
