//! Supabase MCP Server Library
//!
//! This library provides MCP (Model Context Protocol) tools for AI assistants
//! to read and write table data in a Supabase (PostgREST) database.

pub mod backend;
pub mod config;
pub mod error;
pub mod mcp;
pub mod models;
pub mod tools;
pub mod transport;

pub use backend::{PostgrestBackend, TableBackend};
pub use config::Config;
pub use error::TableError;
pub use mcp::TableService;
