//! Shared test support: a recording fake backend.
//!
//! The tool handlers take the backend as a trait object, so tests can
//! substitute this fake to observe exactly which backend calls a tool call
//! produces (and that rejected calls produce none). The in-memory mode
//! additionally stores inserted rows and answers selects by the same
//! equality semantics the real backend applies, so compositions of tool
//! calls can be tested end to end.

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::sync::Mutex;
use supabase_mcp_server::backend::TableBackend;
use supabase_mcp_server::error::{TableError, TableResult};
use supabase_mcp_server::models::{Filter, Row, SelectQuery};

/// One recorded backend invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    Select {
        table: String,
        query: SelectQuery,
    },
    Insert {
        table: String,
        records: Vec<Row>,
    },
    Update {
        table: String,
        patch: Row,
        filters: Vec<Filter>,
    },
    Delete {
        table: String,
        filters: Vec<Filter>,
    },
}

enum Mode {
    /// Every call succeeds with the same canned rows.
    Canned(Vec<Row>),
    /// Every call fails with a backend error.
    Error { message: String, code: Option<String> },
    /// Rows live in an in-memory store; an `id` column is assigned on
    /// insert when absent, standing in for a backend-generated key.
    Store,
}

/// Fake backend that records every call.
pub struct FakeBackend {
    calls: Mutex<Vec<BackendCall>>,
    mode: Mode,
    store: Mutex<Vec<Row>>,
    next_id: Mutex<u64>,
}

impl FakeBackend {
    /// Fake that succeeds with the given rows on every call.
    pub fn returning(rows: Vec<Row>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            mode: Mode::Canned(rows),
            store: Mutex::new(Vec::new()),
            next_id: Mutex::new(1),
        }
    }

    /// Fake that fails every call with a backend error.
    pub fn failing(message: &str, code: Option<&str>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            mode: Mode::Error {
                message: message.to_string(),
                code: code.map(String::from),
            },
            store: Mutex::new(Vec::new()),
            next_id: Mutex::new(1),
        }
    }

    /// Fake that keeps inserted rows in memory and serves them back.
    pub fn in_memory() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            mode: Mode::Store,
            store: Mutex::new(Vec::new()),
            next_id: Mutex::new(1),
        }
    }

    /// Snapshot of the calls recorded so far.
    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: BackendCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn canned_response(&self) -> Option<TableResult<Vec<Row>>> {
        match &self.mode {
            Mode::Canned(rows) => Some(Ok(rows.clone())),
            Mode::Error { message, code } => Some(Err(TableError::backend(
                message.clone(),
                code.clone(),
                "Check the table name, column names, and value types",
            ))),
            Mode::Store => None,
        }
    }

    fn matches(row: &Row, filters: &[Filter]) -> bool {
        filters.iter().all(|f| row.get(&f.column) == Some(&f.value))
    }

    fn project(row: &Row, columns: &Option<Vec<String>>) -> Row {
        match columns {
            None => row.clone(),
            Some(columns) => columns
                .iter()
                .filter_map(|c| row.get(c).map(|v| (c.clone(), v.clone())))
                .collect(),
        }
    }
}

#[async_trait]
impl TableBackend for FakeBackend {
    async fn select(&self, table: &str, query: &SelectQuery) -> TableResult<Vec<Row>> {
        self.record(BackendCall::Select {
            table: table.to_string(),
            query: query.clone(),
        });
        if let Some(response) = self.canned_response() {
            return response;
        }

        let store = self.store.lock().unwrap();
        let offset = query.offset.unwrap_or(0) as usize;
        let limit = query.limit.map(|l| l as usize).unwrap_or(usize::MAX);
        Ok(store
            .iter()
            .filter(|row| Self::matches(row, &query.filters))
            .skip(offset)
            .take(limit)
            .map(|row| Self::project(row, &query.columns))
            .collect())
    }

    async fn insert(&self, table: &str, records: &[Row]) -> TableResult<Vec<Row>> {
        self.record(BackendCall::Insert {
            table: table.to_string(),
            records: records.to_vec(),
        });
        if let Some(response) = self.canned_response() {
            return response;
        }

        let mut store = self.store.lock().unwrap();
        let mut next_id = self.next_id.lock().unwrap();
        let mut created = Vec::with_capacity(records.len());
        for record in records {
            let mut row = record.clone();
            if !row.contains_key("id") {
                row.insert("id".to_string(), JsonValue::from(*next_id));
                *next_id += 1;
            }
            store.push(row.clone());
            created.push(row);
        }
        Ok(created)
    }

    async fn update(&self, table: &str, patch: &Row, filters: &[Filter]) -> TableResult<Vec<Row>> {
        self.record(BackendCall::Update {
            table: table.to_string(),
            patch: patch.clone(),
            filters: filters.to_vec(),
        });
        if let Some(response) = self.canned_response() {
            return response;
        }

        let mut store = self.store.lock().unwrap();
        let mut updated = Vec::new();
        for row in store.iter_mut().filter(|row| Self::matches(row, filters)) {
            for (column, value) in patch {
                row.insert(column.clone(), value.clone());
            }
            updated.push(row.clone());
        }
        Ok(updated)
    }

    async fn delete(&self, table: &str, filters: &[Filter]) -> TableResult<Vec<Row>> {
        self.record(BackendCall::Delete {
            table: table.to_string(),
            filters: filters.to_vec(),
        });
        if let Some(response) = self.canned_response() {
            return response;
        }

        let mut store = self.store.lock().unwrap();
        let mut deleted = Vec::new();
        store.retain(|row| {
            if Self::matches(row, filters) {
                deleted.push(row.clone());
                false
            } else {
                true
            }
        });
        Ok(deleted)
    }
}

/// Build a Row from a JSON object literal.
pub fn row(value: JsonValue) -> Row {
    value.as_object().expect("expected a JSON object").clone()
}
