//! MCP server core.
//!
//! Transport-agnostic request handling: the same `McpServer` sits behind
//! the stdio, streamable HTTP, and SSE transports.

use crate::catalog::{Catalog, DispatchError};
use crate::protocol::{JsonRpcError, McpRequest, McpResponse};
use serde_json::{json, Value};
use tracing::{debug, info, warn};
use unifi_core::ApiError;

pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "unifi";
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

const INSTRUCTIONS: &str = "This server provides access to UniFi network infrastructure via three APIs:\n\
1. **Site Manager API** (cloud): list_hosts, get_host, list_sites, list_devices, get_isp_metrics, query_isp_metrics, get_sdwan_config\n\
2. **Network API** (local console): network_* tools for devices, clients, networks, WiFi, firewall, DNS, vouchers, and more\n\
3. **Protect API** (local console): protect_* tools for cameras, lights, sensors, chimes, door locks, events, and liveviews\n\n\
Start with list_hosts or network_info to discover your infrastructure.";

/// MCP server bound to an immutable tool catalog.
pub struct McpServer {
    catalog: Catalog,
}

impl McpServer {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Handle a single MCP request.
    pub async fn handle_request(&self, request: McpRequest) -> McpResponse {
        debug!(method = %request.method, "Handling MCP request");

        match request.method.as_str() {
            "initialize" => self.handle_initialize(request),
            "initialized" | "notifications/initialized" => {
                McpResponse::success(request.id, json!({}))
            }
            "ping" => McpResponse::success(request.id, json!({})),
            "tools/list" => self.handle_tools_list(request),
            "tools/call" => self.handle_tools_call(request).await,
            _ => McpResponse::error(
                request.id,
                JsonRpcError::method_not_found(&request.method),
            ),
        }
    }

    fn handle_initialize(&self, request: McpRequest) -> McpResponse {
        let client_name = request
            .params
            .as_ref()
            .and_then(|p| p.pointer("/clientInfo/name"))
            .and_then(Value::as_str)
            .unwrap_or("unknown");
        info!(client = %client_name, tools = self.catalog.tools().len(), "Client connected");

        McpResponse::success(
            request.id,
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {
                    "tools": { "listChanged": false }
                },
                "serverInfo": {
                    "name": SERVER_NAME,
                    "version": SERVER_VERSION
                },
                "instructions": INSTRUCTIONS
            }),
        )
    }

    fn handle_tools_list(&self, request: McpRequest) -> McpResponse {
        let tools: Vec<Value> = self.catalog.tools().iter().map(|t| t.to_json()).collect();
        McpResponse::success(request.id, json!({ "tools": tools }))
    }

    async fn handle_tools_call(&self, request: McpRequest) -> McpResponse {
        let params = request.params.as_ref().cloned().unwrap_or(json!({}));

        let Some(tool_name) = params.get("name").and_then(Value::as_str) else {
            return McpResponse::error(
                request.id,
                JsonRpcError::invalid_params("Missing tool name"),
            );
        };
        let arguments = params.get("arguments").cloned().unwrap_or(Value::Null);

        match self.catalog.dispatch(tool_name, &arguments).await {
            Ok(text) => McpResponse::success(
                request.id,
                json!({
                    "content": [{ "type": "text", "text": text }],
                    "isError": false
                }),
            ),
            Err(DispatchError::UnknownTool(name)) => {
                warn!(tool = %name, "Unknown tool invoked");
                McpResponse::error(request.id, JsonRpcError::unknown_tool(&name))
            }
            Err(DispatchError::InvalidArgs(message)) => {
                McpResponse::error(request.id, JsonRpcError::invalid_params(message))
            }
            Err(DispatchError::Backend(err)) => {
                warn!(tool = %tool_name, error = %err, "Backend call failed");
                McpResponse::success(
                    request.id,
                    json!({
                        "content": [{ "type": "text", "text": error_text(&err) }],
                        "isError": true
                    }),
                )
            }
        }
    }
}

/// Error text surfaced to the calling agent, verbatim enough for it to
/// decide whether to retry or change the request.
fn error_text(err: &ApiError) -> String {
    match err {
        ApiError::Api {
            status,
            message,
            trace_id,
        } => {
            let mut parts = vec![format!("Error {status}: {message}")];
            if let Some(trace_id) = trace_id {
                parts.push(format!("Trace ID: {trace_id}"));
            }
            parts.join("\n")
        }
        other => format!("Error: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ToolDef, ToolSet};
    use async_trait::async_trait;
    use std::sync::Arc;
    use unifi_core::ApiResult;

    struct FailingSet;

    #[async_trait]
    impl ToolSet for FailingSet {
        fn defs(&self) -> Vec<ToolDef> {
            vec![ToolDef {
                name: "always_404",
                description: "Always answers 404.",
                input_schema: json!({"type": "object", "properties": {}}),
            }]
        }

        async fn call(&self, _name: &str, _args: &Value) -> ApiResult<String> {
            Err(ApiError::Api {
                status: 404,
                message: "no such thing".into(),
                trace_id: Some("t-1".into()),
            })
        }
    }

    fn server() -> McpServer {
        McpServer::new(Catalog::new(vec![Arc::new(FailingSet)]))
    }

    fn call_request(name: &str, arguments: Value) -> McpRequest {
        McpRequest::new("tools/call")
            .with_id(json!(1))
            .with_params(json!({"name": name, "arguments": arguments}))
    }

    #[tokio::test]
    async fn initialize_reports_server_info() {
        let resp = server()
            .handle_request(McpRequest::new("initialize").with_id(json!(1)))
            .await;
        let result = resp.result.unwrap();
        assert_eq!(result["protocolVersion"], json!(PROTOCOL_VERSION));
        assert_eq!(result["serverInfo"]["name"], json!("unifi"));
        assert!(result["instructions"].as_str().unwrap().contains("Site Manager"));
    }

    #[tokio::test]
    async fn tools_list_reflects_catalog() {
        let resp = server()
            .handle_request(McpRequest::new("tools/list").with_id(json!(2)))
            .await;
        let tools = resp.result.unwrap()["tools"].as_array().unwrap().clone();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0]["name"], json!("always_404"));
        assert!(tools[0]["inputSchema"].is_object());
    }

    #[tokio::test]
    async fn unknown_tool_is_a_jsonrpc_error() {
        let resp = server()
            .handle_request(call_request("network_info", json!({})))
            .await;
        let err = resp.error.unwrap();
        assert_eq!(err.code, -32601);
        assert!(err.message.contains("network_info"));
    }

    #[tokio::test]
    async fn backend_error_becomes_is_error_content() {
        let resp = server()
            .handle_request(call_request("always_404", json!({})))
            .await;
        let result = resp.result.unwrap();
        assert_eq!(result["isError"], json!(true));
        let text = result["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("Error 404: no such thing"));
        assert!(text.contains("Trace ID: t-1"));
    }

    #[tokio::test]
    async fn unhandled_method_is_method_not_found() {
        let resp = server()
            .handle_request(McpRequest::new("resources/list").with_id(json!(3)))
            .await;
        assert_eq!(resp.error.unwrap().code, -32601);
    }
}
