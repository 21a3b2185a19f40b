//! Error types for the Supabase MCP Server.
//!
//! This module defines all error types using `thiserror` for ergonomic error
//! handling. Each error variant provides actionable messages to help AI
//! assistants understand and recover from error conditions.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableError {
    /// Malformed or missing tool parameter. Never reaches the backend.
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// The backend rejected or failed the call (constraint violation,
    /// authorization failure, unknown table or column).
    #[error("Backend error: {message}")]
    Backend {
        message: String,
        /// e.g., "23505" for a unique constraint violation, "42P01" for an
        /// undefined table
        code: Option<String>,
        suggestion: String,
    },

    /// The backend could not be reached at all.
    #[error("Connection failed: {message}")]
    Connection { message: String, suggestion: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl TableError {
    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a backend error with an optional PostgREST error code.
    pub fn backend(
        message: impl Into<String>,
        code: Option<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self::Backend {
            message: message.into(),
            code,
            suggestion: suggestion.into(),
        }
    }

    /// Create a connection error with a helpful suggestion.
    pub fn connection(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the suggestion for this error, if available.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Self::Backend { suggestion, .. } => Some(suggestion),
            Self::Connection { suggestion, .. } => Some(suggestion),
            _ => None,
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Connection { .. })
    }
}

/// Convert reqwest errors to TableError.
impl From<reqwest::Error> for TableError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TableError::connection(
                format!("Request timed out: {}", err),
                "Check network connectivity or increase the request timeout",
            )
        } else if err.is_connect() {
            TableError::connection(
                format!("Could not reach the Supabase endpoint: {}", err),
                "Verify SUPABASE_URL and that the project is reachable",
            )
        } else if err.is_decode() {
            TableError::internal(format!("Failed to decode backend response: {}", err))
        } else {
            TableError::connection(
                format!("HTTP error: {}", err),
                "Check network connectivity and the Supabase project status",
            )
        }
    }
}

/// Result type alias for table operations.
pub type TableResult<T> = Result<T, TableError>;

/// Build suggestion data as JSON value.
fn suggestion_data(suggestion: Option<&str>) -> Option<serde_json::Value> {
    suggestion.map(|s| serde_json::json!({ "suggestion": s }))
}

/// Convert TableError to MCP ErrorData for semantic error categorization.
/// Includes the suggestion field in the `data` object when available.
impl From<TableError> for rmcp::ErrorData {
    fn from(err: TableError) -> Self {
        match &err {
            // Validation -> invalid_params, never retried
            TableError::Validation { .. } => {
                rmcp::ErrorData::invalid_params(err.to_string(), suggestion_data(err.suggestion()))
            }

            // Backend errors -> invalid_params with the PostgREST code in the message
            TableError::Backend {
                message,
                code,
                suggestion,
            } => {
                let msg = match code {
                    Some(code) => format!("{} (code: {})", message, code),
                    None => message.clone(),
                };
                rmcp::ErrorData::invalid_params(msg, suggestion_data(Some(suggestion)))
            }

            // Connection -> internal_error (with implicit retryable flag)
            TableError::Connection { suggestion, .. } => {
                rmcp::ErrorData::internal_error(err.to_string(), suggestion_data(Some(suggestion)))
            }

            // Config, Internal -> internal_error
            TableError::Config { .. } => {
                rmcp::ErrorData::internal_error(err.to_string(), suggestion_data(err.suggestion()))
            }
            TableError::Internal { .. } => {
                rmcp::ErrorData::internal_error(err.to_string(), suggestion_data(err.suggestion()))
            }
        }
    }
}
