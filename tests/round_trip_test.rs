//! Round-trip tests composing the write and read tools against the
//! in-memory fake backend: rows written through one tool come back through
//! the other exactly as written, plus backend-assigned fields.

mod support;

use serde_json::json;
use std::sync::Arc;
use support::{FakeBackend, row};
use supabase_mcp_server::tools::read::{ReadRowsInput, ReadToolHandler};
use supabase_mcp_server::tools::write::{
    CreateRecordsInput, DeleteRecordsInput, UpdateRecordsInput, WriteToolHandler,
};

fn read_input(value: serde_json::Value) -> ReadRowsInput {
    serde_json::from_value(value).unwrap()
}

fn create_input(value: serde_json::Value) -> CreateRecordsInput {
    serde_json::from_value(value).unwrap()
}

fn update_input(value: serde_json::Value) -> UpdateRecordsInput {
    serde_json::from_value(value).unwrap()
}

fn delete_input(value: serde_json::Value) -> DeleteRecordsInput {
    serde_json::from_value(value).unwrap()
}

#[tokio::test]
async fn test_create_then_read_back_by_unique_key() {
    let backend = Arc::new(FakeBackend::in_memory());
    let writer = WriteToolHandler::new(backend.clone());
    let reader = ReadToolHandler::new(backend.clone());

    let created = writer
        .create_records(create_input(json!({
            "table_name": "users",
            "records": {"email": "john@example.com", "name": "John"}
        })))
        .await
        .unwrap();
    assert_eq!(created.row_count, 1);

    let output = reader
        .read_rows(read_input(json!({
            "table_name": "users",
            "filters": {"email": "john@example.com"}
        })))
        .await
        .unwrap();

    // Exactly the written fields come back, plus the backend-assigned id
    assert_eq!(output.row_count, 1);
    let fetched = &output.rows[0];
    assert_eq!(fetched["email"], "john@example.com");
    assert_eq!(fetched["name"], "John");
    assert!(fetched.contains_key("id"));
    assert_eq!(output.rows, created.rows);

    // One insert, one select: no extra backend traffic
    assert_eq!(backend.calls().len(), 2);
}

#[tokio::test]
async fn test_create_then_read_back_with_projection() {
    let backend = Arc::new(FakeBackend::in_memory());
    let writer = WriteToolHandler::new(backend.clone());
    let reader = ReadToolHandler::new(backend.clone());

    writer
        .create_records(create_input(json!({
            "table_name": "users",
            "records": [
                {"email": "john@example.com", "name": "John"},
                {"email": "jane@example.com", "name": "Jane"}
            ]
        })))
        .await
        .unwrap();

    let output = reader
        .read_rows(read_input(json!({
            "table_name": "users",
            "columns": ["name"],
            "filters": {"email": "jane@example.com"}
        })))
        .await
        .unwrap();

    assert_eq!(output.row_count, 1);
    assert_eq!(output.rows[0], row(json!({"name": "Jane"})));
}

#[tokio::test]
async fn test_update_then_read_back_shows_patch() {
    let backend = Arc::new(FakeBackend::in_memory());
    let writer = WriteToolHandler::new(backend.clone());
    let reader = ReadToolHandler::new(backend.clone());

    writer
        .create_records(create_input(json!({
            "table_name": "users",
            "records": {"email": "john@example.com", "status": "free"}
        })))
        .await
        .unwrap();

    let updated = writer
        .update_records(update_input(json!({
            "table_name": "users",
            "updates": {"status": "premium"},
            "filters": {"email": "john@example.com"}
        })))
        .await
        .unwrap();
    assert_eq!(updated.row_count, 1);
    assert_eq!(updated.rows[0]["status"], "premium");

    let output = reader
        .read_rows(read_input(json!({
            "table_name": "users",
            "filters": {"email": "john@example.com"}
        })))
        .await
        .unwrap();

    assert_eq!(output.rows[0]["status"], "premium");
    assert_eq!(output.rows[0]["email"], "john@example.com");
}

#[tokio::test]
async fn test_delete_then_read_back_finds_nothing() {
    let backend = Arc::new(FakeBackend::in_memory());
    let writer = WriteToolHandler::new(backend.clone());
    let reader = ReadToolHandler::new(backend.clone());

    writer
        .create_records(create_input(json!({
            "table_name": "users",
            "records": [
                {"email": "john@example.com"},
                {"email": "jane@example.com"}
            ]
        })))
        .await
        .unwrap();

    let deleted = writer
        .delete_records(delete_input(json!({
            "table_name": "users",
            "filters": {"email": "john@example.com"}
        })))
        .await
        .unwrap();
    assert_eq!(deleted.row_count, 1);

    let gone = reader
        .read_rows(read_input(json!({
            "table_name": "users",
            "filters": {"email": "john@example.com"}
        })))
        .await
        .unwrap();
    assert_eq!(gone.row_count, 0);

    let remaining = reader
        .read_rows(read_input(json!({"table_name": "users"})))
        .await
        .unwrap();
    assert_eq!(remaining.row_count, 1);
    assert_eq!(remaining.rows[0]["email"], "jane@example.com");
}
