//! Data models for the Supabase MCP Server.
//!
//! This module re-exports all model types used throughout the application.

pub mod filter;
pub mod query;

// Re-export commonly used types
pub use filter::{
    Filter, Row, normalize_filters, require_filters, validate_columns, validate_record,
    validate_table_name,
};
pub use query::{OrderBy, Records, SelectQuery};
