//! Query descriptors passed to the backend.
//!
//! Each tool call is composed into exactly one backend call. The descriptors
//! here carry everything the backend needs for that call: projection,
//! normalized filters, ordering, and pagination for reads; a normalized
//! record list for inserts.

use crate::error::{TableError, TableResult};
use crate::models::filter::{Filter, Row, validate_record};
use schemars::JsonSchema;
use serde::Deserialize;

/// Sort specification for a select.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub column: String,
    pub ascending: bool,
}

impl OrderBy {
    pub fn new(column: impl Into<String>, ascending: bool) -> Self {
        Self {
            column: column.into(),
            ascending,
        }
    }
}

/// Descriptor for a single select call against one table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectQuery {
    /// Columns to project. `None` means all columns. No de-duplication or
    /// schema validation is performed locally.
    pub columns: Option<Vec<String>>,
    /// Conjunction of equality constraints. Empty means all rows.
    pub filters: Vec<Filter>,
    pub order: Option<OrderBy>,
    /// Maximum rows to return. Backend default page size when absent.
    pub limit: Option<u32>,
    /// Rows to skip. Backend-defined when absent.
    pub offset: Option<u32>,
}

impl SelectQuery {
    /// Create a select for all columns and all rows.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the column projection.
    pub fn with_columns(mut self, columns: Vec<String>) -> Self {
        self.columns = Some(columns);
        self
    }

    /// Set the equality filters.
    pub fn with_filters(mut self, filters: Vec<Filter>) -> Self {
        self.filters = filters;
        self
    }

    /// Set the ordering.
    pub fn with_order(mut self, order: OrderBy) -> Self {
        self.order = Some(order);
        self
    }

    /// Set the row limit.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the row offset.
    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }
}

/// Record payload for create: a single row or a list of rows.
///
/// Both shapes are normalized to list form before the backend call, so a
/// single mapping and a one-element list produce identical inserts.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Records {
    /// A single record
    One(Row),
    /// Multiple records for a bulk insert
    Many(Vec<Row>),
}

impl Records {
    /// Normalize to list form, validating that the payload is non-empty and
    /// every record has a valid shape.
    pub fn into_rows(self) -> TableResult<Vec<Row>> {
        let rows = match self {
            Records::One(row) => vec![row],
            Records::Many(rows) => rows,
        };
        if rows.is_empty() {
            return Err(TableError::validation(
                "records must contain at least one record",
            ));
        }
        for row in &rows {
            validate_record(row, "records")?;
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_select_query_defaults() {
        let query = SelectQuery::new();
        assert!(query.columns.is_none());
        assert!(query.filters.is_empty());
        assert!(query.order.is_none());
        assert!(query.limit.is_none());
        assert!(query.offset.is_none());
    }

    #[test]
    fn test_select_query_builder() {
        let query = SelectQuery::new()
            .with_columns(vec!["id".to_string(), "name".to_string()])
            .with_filters(vec![Filter::new("is_active", true)])
            .with_order(OrderBy::new("created_at", false))
            .with_limit(10)
            .with_offset(20);

        assert_eq!(query.columns.as_deref().unwrap().len(), 2);
        assert_eq!(query.filters.len(), 1);
        assert_eq!(query.order, Some(OrderBy::new("created_at", false)));
        assert_eq!(query.limit, Some(10));
        assert_eq!(query.offset, Some(20));
    }

    #[test]
    fn test_records_single_normalizes_to_list() {
        let records: Records = serde_json::from_value(json!({"name": "John"})).unwrap();
        let rows = records.into_rows().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["name"], "John");
    }

    #[test]
    fn test_records_single_equals_one_element_list() {
        let single: Records = serde_json::from_value(json!({"name": "John"})).unwrap();
        let list: Records = serde_json::from_value(json!([{"name": "John"}])).unwrap();
        assert_eq!(single.into_rows().unwrap(), list.into_rows().unwrap());
    }

    #[test]
    fn test_records_many() {
        let records: Records =
            serde_json::from_value(json!([{"name": "John"}, {"name": "Jane"}])).unwrap();
        let rows = records.into_rows().unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_records_empty_list_rejected() {
        let records: Records = serde_json::from_value(json!([])).unwrap();
        let err = records.into_rows().unwrap_err();
        assert!(err.to_string().contains("at least one record"));
    }

    #[test]
    fn test_records_empty_record_rejected() {
        let records: Records = serde_json::from_value(json!([{"name": "John"}, {}])).unwrap();
        assert!(records.into_rows().is_err());
    }
}
