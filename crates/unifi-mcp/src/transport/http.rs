//! HTTP transports.
//!
//! `HttpTransport` is the streamable variant: clients POST JSON-RPC to
//! `/mcp`. `SseTransport` serves clients that open an event stream on
//! `/sse` and POST messages to the announced `/message` endpoint.

use super::{McpHandler, Transport};
use crate::{McpRequest, McpResponse};
use anyhow::Result;
use axum::{
    extract::State,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Json,
    },
    routing::{get, post},
    Router,
};
use futures::stream::{self, Stream, StreamExt};
use serde_json::json;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info};

const KEEPALIVE_INTERVAL: Duration = Duration::from_secs(30);

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Streamable HTTP transport: JSON-RPC over POST /mcp.
pub struct HttpTransport {
    bind_addr: String,
}

impl HttpTransport {
    pub fn new(bind_addr: impl Into<String>) -> Self {
        Self {
            bind_addr: bind_addr.into(),
        }
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn serve<H: McpHandler + 'static>(self, handler: Arc<H>) -> Result<()> {
        let app = Router::new()
            .route("/mcp", post(mcp_handler::<H>))
            .route("/health", get(health_handler))
            .layer(cors())
            .with_state(handler);

        let listener = tokio::net::TcpListener::bind(&self.bind_addr).await?;
        info!(addr = %self.bind_addr, "HTTP transport listening");

        axum::serve(listener, app).await?;
        Ok(())
    }
}

/// SSE transport: event stream on GET /sse, messages on POST /message.
pub struct SseTransport {
    bind_addr: String,
}

impl SseTransport {
    pub fn new(bind_addr: impl Into<String>) -> Self {
        Self {
            bind_addr: bind_addr.into(),
        }
    }
}

#[async_trait::async_trait]
impl Transport for SseTransport {
    async fn serve<H: McpHandler + 'static>(self, handler: Arc<H>) -> Result<()> {
        let app = Router::new()
            .route("/sse", get(sse_handler))
            .route("/message", post(mcp_handler::<H>))
            .route("/health", get(health_handler))
            .layer(cors())
            .with_state(handler);

        let listener = tokio::net::TcpListener::bind(&self.bind_addr).await?;
        info!(addr = %self.bind_addr, "SSE transport listening");

        axum::serve(listener, app).await?;
        Ok(())
    }
}

// === Handlers ===

async fn health_handler() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": crate::SERVER_NAME,
        "version": crate::SERVER_VERSION
    }))
}

async fn mcp_handler<H: McpHandler>(
    State(handler): State<Arc<H>>,
    Json(request): Json<McpRequest>,
) -> Json<McpResponse> {
    debug!(method = %request.method, "HTTP MCP request");
    let response = handler.handle_request(request).await;
    Json(response)
}

async fn sse_handler() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    info!("SSE client connected");

    // Tell the client where to POST its messages, then keep the stream warm.
    let initial = stream::iter(vec![
        Ok(Event::default().event("endpoint").data("/message")),
        Ok(Event::default().event("connected").data(
            json!({
                "server": crate::SERVER_NAME,
                "version": crate::SERVER_VERSION
            })
            .to_string(),
        )),
    ]);

    let keepalive = stream::unfold(0u64, |counter| async move {
        tokio::time::sleep(KEEPALIVE_INTERVAL).await;
        let event = Event::default()
            .event("ping")
            .data(json!({ "counter": counter }).to_string());
        Some((Ok(event), counter + 1))
    });

    Sse::new(initial.chain(keepalive))
        .keep_alive(KeepAlive::new().interval(KEEPALIVE_INTERVAL).text("keepalive"))
}
