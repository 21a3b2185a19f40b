//! PostgREST backend client.
//!
//! Supabase exposes every table through PostgREST at
//! `{project_url}/rest/v1/{table}`. This client renders query descriptors
//! into PostgREST requests, authenticated with the service role key, and
//! maps PostgREST error bodies back into backend errors.

use crate::backend::TableBackend;
use crate::config::Config;
use crate::error::{TableError, TableResult};
use crate::models::{Filter, Row, SelectQuery};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use tracing::debug;
use url::Url;

/// Error body shape returned by PostgREST.
#[derive(Debug, Deserialize)]
struct PostgrestErrorBody {
    message: Option<String>,
    code: Option<String>,
    hint: Option<String>,
}

/// HTTP client for the Supabase REST (PostgREST) API.
pub struct PostgrestBackend {
    client: reqwest::Client,
    rest_url: Url,
}

impl PostgrestBackend {
    /// Build the backend from configuration. Performed once at startup; the
    /// resulting handle is shared read-only across all sessions.
    pub fn new(config: &Config) -> TableResult<Self> {
        config.validate_credentials()?;
        let rest_url = config.rest_url()?;

        let key = config.service_key.trim();
        let mut headers = HeaderMap::new();
        let apikey = HeaderValue::from_str(key)
            .map_err(|_| TableError::config("SUPABASE_SERVICE_KEY contains invalid characters"))?;
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", key))
            .map_err(|_| TableError::config("SUPABASE_SERVICE_KEY contains invalid characters"))?;
        bearer.set_sensitive(true);
        headers.insert("apikey", apikey);
        headers.insert(AUTHORIZATION, bearer);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout_duration())
            .connect_timeout(config.connect_timeout_duration())
            .build()
            .map_err(|e| {
                TableError::connection(
                    format!("Failed to build HTTP client: {}", e),
                    "Check TLS support in the build environment",
                )
            })?;

        Ok(Self { client, rest_url })
    }

    /// Resolve the endpoint URL for a table.
    fn table_url(&self, table: &str) -> TableResult<Url> {
        self.rest_url
            .join(table)
            .map_err(|e| TableError::validation(format!("Invalid table name '{}': {}", table, e)))
    }

    /// Render an equality filter as a PostgREST query pair.
    /// `col=eq.value`, or `col=is.null` for null comparisons.
    fn filter_pair(filter: &Filter) -> (String, String) {
        let rhs = match &filter.value {
            JsonValue::Null => "is.null".to_string(),
            JsonValue::String(s) => format!("eq.{}", s),
            other => format!("eq.{}", other),
        };
        (filter.column.clone(), rhs)
    }

    /// Append filter pairs to a request URL.
    fn apply_filters(url: &mut Url, filters: &[Filter]) {
        let mut pairs = url.query_pairs_mut();
        for filter in filters {
            let (column, rhs) = Self::filter_pair(filter);
            pairs.append_pair(&column, &rhs);
        }
    }

    /// Decode a response: a JSON row array on success, a mapped backend
    /// error otherwise.
    async fn decode_rows(response: reqwest::Response) -> TableResult<Vec<Row>> {
        let status = response.status();
        if status.is_success() {
            return response.json::<Vec<Row>>().await.map_err(|e| {
                TableError::internal(format!("Unexpected backend response shape: {}", e))
            });
        }

        let body = response.text().await.unwrap_or_default();
        let parsed: Option<PostgrestErrorBody> = serde_json::from_str(&body).ok();
        match parsed {
            Some(err_body) => {
                let message = err_body
                    .message
                    .unwrap_or_else(|| format!("Backend returned HTTP {}", status));
                let suggestion = err_body.hint.unwrap_or_else(|| {
                    "Check the table name, column names, and value types".to_string()
                });
                Err(TableError::backend(message, err_body.code, suggestion))
            }
            None => Err(TableError::backend(
                format!("Backend returned HTTP {}: {}", status, body),
                None,
                "Check the table name, column names, and value types",
            )),
        }
    }
}

#[async_trait]
impl TableBackend for PostgrestBackend {
    async fn select(&self, table: &str, query: &SelectQuery) -> TableResult<Vec<Row>> {
        let mut url = self.table_url(table)?;

        let mut pairs: Vec<(String, String)> = Vec::new();
        if let Some(columns) = &query.columns {
            pairs.push(("select".to_string(), columns.join(",")));
        }
        pairs.extend(query.filters.iter().map(Self::filter_pair));
        if let Some(order) = &query.order {
            let direction = if order.ascending { "asc" } else { "desc" };
            pairs.push(("order".to_string(), format!("{}.{}", order.column, direction)));
        }
        if let Some(limit) = query.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(offset) = query.offset {
            pairs.push(("offset".to_string(), offset.to_string()));
        }
        // Leave the URL bare for an unqualified select-all
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }

        debug!(table = table, url = %url, "select");
        let response = self.client.get(url).send().await?;
        Self::decode_rows(response).await
    }

    async fn insert(&self, table: &str, records: &[Row]) -> TableResult<Vec<Row>> {
        let url = self.table_url(table)?;

        debug!(table = table, count = records.len(), "insert");
        let response = self
            .client
            .post(url)
            .header("Prefer", "return=representation")
            .json(records)
            .send()
            .await?;
        Self::decode_rows(response).await
    }

    async fn update(&self, table: &str, patch: &Row, filters: &[Filter]) -> TableResult<Vec<Row>> {
        let mut url = self.table_url(table)?;
        Self::apply_filters(&mut url, filters);

        debug!(table = table, url = %url, "update");
        let response = self
            .client
            .patch(url)
            .header("Prefer", "return=representation")
            .json(patch)
            .send()
            .await?;
        Self::decode_rows(response).await
    }

    async fn delete(&self, table: &str, filters: &[Filter]) -> TableResult<Vec<Row>> {
        let mut url = self.table_url(table)?;
        Self::apply_filters(&mut url, filters);

        debug!(table = table, url = %url, "delete");
        let response = self
            .client
            .delete(url)
            .header("Prefer", "return=representation")
            .send()
            .await?;
        Self::decode_rows(response).await
    }
}
