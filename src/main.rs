//! Supabase MCP Server - Main entry point.
//!
//! This server provides MCP (Model Context Protocol) tools for AI assistants
//! to read and write table data in a Supabase (PostgREST) database.

use clap::Parser;
use std::sync::Arc;
use supabase_mcp_server::backend::PostgrestBackend;
use supabase_mcp_server::config::{Config, TransportMode};
use supabase_mcp_server::transport::{HttpTransport, StdioTransport, Transport};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the tracing subscriber for logging.
fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if config.json_logs {
        subscriber.with(fmt::layer().json()).init();
    } else {
        subscriber
            .with(fmt::layer().with_target(true).with_thread_ids(false))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse configuration from command line and environment
    let config = Config::parse();

    // Initialize logging
    init_tracing(&config);

    // Require the Supabase credentials before starting
    if config.validate_credentials().is_err() {
        eprintln!("Error: SUPABASE_URL and SUPABASE_SERVICE_KEY must be set.");
        eprintln!();
        eprintln!("Usage: supabase-mcp-server --supabase-url <URL> --service-key <KEY>");
        eprintln!();
        eprintln!("Environment variables:");
        eprintln!("  SUPABASE_URL          Supabase project URL (e.g. https://xyzcompany.supabase.co)");
        eprintln!("  SUPABASE_SERVICE_KEY  Service role key for the project");
        std::process::exit(1);
    }

    info!(
        transport = %config.transport,
        "Starting Supabase MCP Server v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Build the backend handle once; it is shared read-only by all sessions
    let backend = Arc::new(PostgrestBackend::new(&config)?);
    info!(url = %config.rest_url()?, "Supabase REST backend configured");

    // Run the appropriate transport
    let result = match config.transport {
        TransportMode::Stdio => {
            info!("Using stdio transport");
            let transport = StdioTransport::new(backend);
            transport.run().await
        }
        TransportMode::Http => {
            info!(
                host = %config.http_host,
                port = config.http_port,
                endpoint = %config.mcp_endpoint,
                "Using HTTP transport"
            );
            let transport = HttpTransport::new(
                backend,
                &config.http_host,
                config.http_port,
                &config.mcp_endpoint,
            );
            transport.run().await
        }
    };

    if let Err(e) = result {
        error!(error = %e, "Server error");
        return Err(e.into());
    }

    info!("Server shutdown complete");
    Ok(())
}
