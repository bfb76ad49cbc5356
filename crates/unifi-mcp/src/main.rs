//! unifi-mcp server binary.
//!
//! Transports:
//!   unifi-mcp                                  # stdio (default)
//!   unifi-mcp --transport streamable-http      # POST /mcp on port 8000
//!   unifi-mcp --transport sse                  # GET /sse + POST /message
//!
//! Configuration comes from UNIFI_* environment variables; the cloud API
//! key is mandatory, the Network and Protect consoles are enabled by
//! setting their host variables.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use unifi_api::{CloudClient, NetworkClient, ProtectClient};
use unifi_core::Settings;
use unifi_mcp::catalog::{Catalog, ToolSet};
use unifi_mcp::tools::{CloudTools, NetworkTools, ProtectTools};
use unifi_mcp::transport::{HttpTransport, SseTransport, StdioTransport, Transport};
use unifi_mcp::McpServer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TransportKind {
    Stdio,
    Sse,
    #[value(name = "streamable-http")]
    StreamableHttp,
}

#[derive(Parser)]
#[command(name = "unifi-mcp")]
#[command(about = "UniFi MCP gateway server")]
struct Cli {
    /// Transport protocol
    #[arg(long, value_enum, default_value = "stdio")]
    transport: TransportKind,

    /// Host to bind to for HTTP transports
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port for HTTP transports
    #[arg(long, default_value_t = 8000)]
    port: u16,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging goes to stderr so the stdio transport keeps stdout clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::from_env()?;

    let mut sets: Vec<Arc<dyn ToolSet>> =
        vec![Arc::new(CloudTools::new(CloudClient::new(&settings.cloud)?))];
    info!("Site Manager API client initialized");

    match &settings.network {
        Some(network) => {
            sets.push(Arc::new(NetworkTools::new(NetworkClient::new(network)?)));
            info!(host = %network.host, "Network API client initialized");
        }
        None => info!("Network API client not configured (UNIFI_NETWORK_HOST not set)"),
    }

    match &settings.protect {
        Some(protect) => {
            sets.push(Arc::new(ProtectTools::new(ProtectClient::new(protect)?)));
            info!(host = %protect.host, "Protect API client initialized");
        }
        None => info!("Protect API client not configured (UNIFI_PROTECT_HOST not set)"),
    }

    let server = Arc::new(McpServer::new(Catalog::new(sets)));
    info!(tools = server.catalog().tools().len(), "Tool catalog assembled");

    let bind_addr = format!("{}:{}", cli.host, cli.port);
    match cli.transport {
        TransportKind::Stdio => StdioTransport::new().serve(server).await,
        TransportKind::Sse => SseTransport::new(bind_addr).serve(server).await,
        TransportKind::StreamableHttp => HttpTransport::new(bind_addr).serve(server).await,
    }
}
