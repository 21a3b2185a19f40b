//! Filter normalization and input validation.
//!
//! Filters arrive from tool calls as a JSON object mapping column names to
//! scalar values. This module converts them into an ordered list of equality
//! constraints the backend understands, and hosts the shared structural
//! validation for table names and record payloads.

use crate::error::{TableError, TableResult};
use serde_json::Value as JsonValue;

/// A single table row: dynamic column-to-value mapping with no fixed schema.
pub type Row = serde_json::Map<String, JsonValue>;

/// A single equality constraint (`column = value`).
///
/// Equality is the only supported operator. Range, inequality, and IN-style
/// filters are deliberately out of scope for this server.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: String,
    pub value: JsonValue,
}

impl Filter {
    pub fn new(column: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }
}

/// Validate a table name: trimmed, non-empty, free of URL metacharacters.
///
/// No existence check is performed here; an unknown table fails at the
/// backend with its own error. `/`, `?`, and `#` are rejected locally
/// because they would splice into the request URL as path, query, or
/// fragment instead of reaching the backend as part of a name.
pub fn validate_table_name(table_name: &str) -> TableResult<&str> {
    let trimmed = table_name.trim();
    if trimmed.is_empty() {
        return Err(TableError::validation("table_name must not be empty"));
    }
    if trimmed.contains(['/', '?', '#']) {
        return Err(TableError::validation(
            "table_name must not contain '/', '?', or '#'",
        ));
    }
    Ok(trimmed)
}

/// Validate a column projection: non-empty list with non-blank names.
pub fn validate_columns(columns: &[String]) -> TableResult<()> {
    if columns.is_empty() {
        return Err(TableError::validation(
            "columns must not be empty. Omit the parameter to select all columns.",
        ));
    }
    for column in columns {
        if column.trim().is_empty() {
            return Err(TableError::validation("column names must not be empty"));
        }
    }
    Ok(())
}

/// Normalize an optional filter mapping into an ordered list of equality
/// constraints, preserving input iteration order.
///
/// An absent or empty mapping yields an empty list; whether that is allowed
/// depends on the operation (read matches all rows, write is rejected via
/// [`require_filters`]).
pub fn normalize_filters(filters: Option<&Row>) -> TableResult<Vec<Filter>> {
    let Some(filters) = filters else {
        return Ok(Vec::new());
    };

    let mut normalized = Vec::with_capacity(filters.len());
    for (column, value) in filters {
        if column.trim().is_empty() {
            return Err(TableError::validation(
                "filter column names must not be empty",
            ));
        }
        // Equality against an array or object has no meaningful rendering;
        // only scalars and null are accepted in filter position.
        if matches!(value, JsonValue::Array(_) | JsonValue::Object(_)) {
            return Err(TableError::validation(format!(
                "filter value for column '{}' must be a scalar or null",
                column
            )));
        }
        normalized.push(Filter::new(column.clone(), value.clone()));
    }
    Ok(normalized)
}

/// Require at least one filter constraint for a mutation.
///
/// Update and delete with no filters would silently apply to the entire
/// table, so an empty filter set is rejected before any backend call. Read
/// intentionally has no such requirement.
pub fn require_filters(filters: &[Filter], operation: &str) -> TableResult<()> {
    if filters.is_empty() {
        return Err(TableError::validation(format!(
            "{} requires at least one filter. An empty filter set would affect every row in the table.",
            operation
        )));
    }
    Ok(())
}

/// Validate the structural shape of a record payload: non-empty, with
/// non-blank string keys. Values pass through opaquely to the backend,
/// nested JSON included; field-level typing is the backend's responsibility.
pub fn validate_record(record: &Row, what: &str) -> TableResult<()> {
    if record.is_empty() {
        return Err(TableError::validation(format!(
            "{} must contain at least one column",
            what
        )));
    }
    for column in record.keys() {
        if column.trim().is_empty() {
            return Err(TableError::validation(format!(
                "{} column names must not be empty",
                what
            )));
        }
    }
    Ok(())
}
