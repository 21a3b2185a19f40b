//! Configuration handling for the Supabase MCP Server.
//!
//! This module provides configuration management via CLI arguments and
//! environment variables. The two required values (project URL and service
//! role key) match the environment the original Supabase tooling expects.

use crate::error::{TableError, TableResult};
use clap::{Parser, ValueEnum};
use std::time::Duration;
use url::Url;

pub const DEFAULT_HTTP_HOST: &str = "127.0.0.1";
pub const DEFAULT_HTTP_PORT: u16 = 8080;
pub const DEFAULT_MCP_ENDPOINT: &str = "/";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Path prefix of the PostgREST API on a Supabase project.
pub const REST_PATH: &str = "/rest/v1/";

/// Transport mode for the MCP server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TransportMode {
    /// Standard input/output (for CLI integration)
    #[default]
    Stdio,
    /// HTTP with Server-Sent Events (for web clients)
    Http,
}

impl std::fmt::Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stdio => write!(f, "stdio"),
            Self::Http => write!(f, "http"),
        }
    }
}

/// Configuration for the Supabase MCP Server.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "supabase-mcp-server",
    about = "MCP server for Supabase database operations - enables AI assistants to read and write table data",
    version,
    author
)]
pub struct Config {
    /// Supabase project URL (e.g. https://xyzcompany.supabase.co)
    #[arg(long, value_name = "URL", env = "SUPABASE_URL", default_value = "")]
    pub supabase_url: String,

    /// Supabase service role key. Grants full table access - keep it secret.
    #[arg(
        long,
        value_name = "KEY",
        env = "SUPABASE_SERVICE_KEY",
        hide_env_values = true,
        default_value = ""
    )]
    pub service_key: String,

    /// Transport mode (stdio or http)
    #[arg(
        short,
        long,
        value_enum,
        default_value = "stdio",
        env = "MCP_TRANSPORT"
    )]
    pub transport: TransportMode,

    /// HTTP host to bind to (only used with http transport)
    #[arg(
        long,
        default_value = DEFAULT_HTTP_HOST,
        env = "MCP_HTTP_HOST"
    )]
    pub http_host: String,

    /// HTTP port to bind to (only used with http transport)
    #[arg(
        long,
        default_value_t = DEFAULT_HTTP_PORT,
        env = "MCP_HTTP_PORT"
    )]
    pub http_port: u16,

    /// MCP endpoint path (only used with http transport)
    #[arg(
        long,
        default_value = DEFAULT_MCP_ENDPOINT,
        env = "MCP_ENDPOINT"
    )]
    pub mcp_endpoint: String,

    /// Backend request timeout in seconds
    #[arg(
        long,
        default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS,
        env = "MCP_REQUEST_TIMEOUT"
    )]
    pub request_timeout: u64,

    /// Backend connect timeout in seconds
    #[arg(
        long,
        default_value_t = DEFAULT_CONNECT_TIMEOUT_SECS,
        env = "MCP_CONNECT_TIMEOUT"
    )]
    pub connect_timeout: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "MCP_LOG_LEVEL")]
    pub log_level: String,

    /// Enable JSON logging format
    #[arg(long, env = "MCP_JSON_LOGS")]
    pub json_logs: bool,
}

impl Config {
    /// Parse configuration from command line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Create a default configuration (useful for testing).
    pub fn default_config() -> Self {
        Self {
            supabase_url: String::new(),
            service_key: String::new(),
            transport: TransportMode::Stdio,
            http_host: DEFAULT_HTTP_HOST.to_string(),
            http_port: DEFAULT_HTTP_PORT,
            mcp_endpoint: DEFAULT_MCP_ENDPOINT.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT_SECS,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT_SECS,
            log_level: "info".to_string(),
            json_logs: false,
        }
    }

    /// Check that both required credentials are present and non-blank.
    pub fn validate_credentials(&self) -> TableResult<()> {
        if self.supabase_url.trim().is_empty() || self.service_key.trim().is_empty() {
            return Err(TableError::config(
                "Missing configuration. Please set SUPABASE_URL and SUPABASE_SERVICE_KEY.",
            ));
        }
        Ok(())
    }

    /// Derive the PostgREST base URL (`{supabase_url}/rest/v1/`).
    pub fn rest_url(&self) -> TableResult<Url> {
        let base = Url::parse(self.supabase_url.trim())
            .map_err(|e| TableError::config(format!("Invalid SUPABASE_URL: {}", e)))?;
        // Normalize the path so joins against table names work regardless of
        // whether the configured URL carries a trailing slash.
        let rest = format!("{}{}", base.as_str().trim_end_matches('/'), REST_PATH);
        Url::parse(&rest).map_err(|e| TableError::config(format!("Invalid SUPABASE_URL: {}", e)))
    }

    /// Get the HTTP bind address.
    pub fn http_bind_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }

    /// Get the request timeout as a Duration.
    pub fn request_timeout_duration(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Get the connect timeout as a Duration.
    pub fn connect_timeout_duration(&self) -> Duration {
        Duration::from_secs(self.connect_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}
