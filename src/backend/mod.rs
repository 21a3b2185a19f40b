//! Backend abstraction layer.
//!
//! The storage backend is an external collaborator reached over its own
//! client. This module defines the seam the tool handlers call through:
//! four per-table primitives, each returning the affected rows or a backend
//! error. Handlers hold the backend as `Arc<dyn TableBackend>` so tests can
//! substitute a fake.

pub mod postgrest;

pub use postgrest::PostgrestBackend;

use crate::error::TableResult;
use crate::models::{Filter, Row, SelectQuery};
use async_trait::async_trait;

/// The four storage primitives this server composes tool calls from.
///
/// Every call is a single backend round-trip; there is no retry, batching,
/// or cross-call state at this layer. Implementations must be safe for
/// concurrent calls from multiple sessions.
#[async_trait]
pub trait TableBackend: Send + Sync {
    /// Select rows matching the query descriptor.
    async fn select(&self, table: &str, query: &SelectQuery) -> TableResult<Vec<Row>>;

    /// Insert one or more records, returning the created rows including
    /// backend-assigned fields such as generated identifiers.
    async fn insert(&self, table: &str, records: &[Row]) -> TableResult<Vec<Row>>;

    /// Apply a patch to all rows matching the filters, returning the updated
    /// rows. Callers guarantee `filters` is non-empty.
    async fn update(&self, table: &str, patch: &Row, filters: &[Filter]) -> TableResult<Vec<Row>>;

    /// Delete all rows matching the filters, returning the deleted rows.
    /// Callers guarantee `filters` is non-empty.
    async fn delete(&self, table: &str, filters: &[Filter]) -> TableResult<Vec<Row>>;
}
