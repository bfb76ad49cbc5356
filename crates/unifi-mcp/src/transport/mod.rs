//! Transport layer.
//!
//! Three transports carry the same `McpServer`:
//! - stdio (line-delimited JSON-RPC, the default)
//! - streamable HTTP (POST /mcp)
//! - SSE (GET /sse + POST /message)

mod http;
mod stdio;

pub use http::{HttpTransport, SseTransport};
pub use stdio::StdioTransport;

use anyhow::Result;
use std::sync::Arc;

/// Request handler seen by the transport layer.
#[async_trait::async_trait]
pub trait McpHandler: Send + Sync {
    async fn handle_request(&self, request: crate::McpRequest) -> crate::McpResponse;
}

/// A way of carrying MCP requests to a handler.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Serve requests until the peer disconnects or the process is stopped.
    async fn serve<H: McpHandler + 'static>(self, handler: Arc<H>) -> Result<()>;
}

#[async_trait::async_trait]
impl McpHandler for crate::McpServer {
    async fn handle_request(&self, request: crate::McpRequest) -> crate::McpResponse {
        self.handle_request(request).await
    }
}
