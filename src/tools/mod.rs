//! MCP tool implementations.
//!
//! This module contains the four table tool handlers:
//! - `read_table_rows`: Read rows with optional projection, filters,
//!   ordering, and pagination
//! - `create_table_records`: Insert one or more records
//! - `update_table_records`: Update rows matching a filter set
//! - `delete_table_records`: Delete rows matching a filter set

pub mod read;
pub mod write;

pub use read::{ReadRowsInput, ReadRowsOutput, ReadToolHandler};
pub use write::{
    CreateRecordsInput, DeleteRecordsInput, UpdateRecordsInput, WriteOutput, WriteToolHandler,
};
