//! End-to-end dispatch tests against mocked backends.

use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use unifi_api::{CloudClient, NetworkClient};
use unifi_core::{CloudSettings, ConsoleSettings};
use unifi_mcp::catalog::{Catalog, ToolSet};
use unifi_mcp::tools::{CloudTools, NetworkTools};
use unifi_mcp::{McpRequest, McpServer};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn cloud_tools(base_url: &str) -> Arc<dyn ToolSet> {
    let settings = CloudSettings {
        api_key: "cloud-key".into(),
        base_url: base_url.into(),
        timeout: Duration::from_secs(5),
    };
    Arc::new(CloudTools::new(CloudClient::new(&settings).unwrap()))
}

fn network_tools(base_url: &str) -> Arc<dyn ToolSet> {
    let settings = ConsoleSettings {
        host: "console.local".into(),
        api_key: "net-key".into(),
        verify_tls: true,
        timeout: Duration::from_secs(5),
    };
    Arc::new(NetworkTools::new(
        NetworkClient::with_base_url(&settings, base_url).unwrap(),
    ))
}

fn call(name: &str, arguments: Value) -> McpRequest {
    McpRequest::new("tools/call")
        .with_id(json!(1))
        .with_params(json!({"name": name, "arguments": arguments}))
}

#[tokio::test]
async fn cloud_only_catalog_rejects_console_tools_as_unknown() {
    let cloud = MockServer::start().await;
    let server = McpServer::new(Catalog::new(vec![cloud_tools(&cloud.uri())]));

    let listed = server
        .handle_request(McpRequest::new("tools/list").with_id(json!(1)))
        .await;
    let tools = listed.result.unwrap()["tools"].as_array().unwrap().clone();
    assert!(tools.iter().any(|t| t["name"] == json!("list_hosts")));
    assert!(!tools.iter().any(|t| t["name"]
        .as_str()
        .is_some_and(|n| n.starts_with("network_") || n.starts_with("protect_"))));

    let resp = server
        .handle_request(call("network_info", json!({})))
        .await;
    let err = resp.error.unwrap();
    assert_eq!(err.code, -32601);
    assert!(err.message.contains("Unknown tool"));
}

#[tokio::test]
async fn list_hosts_issues_one_get_with_api_key_and_formats_all_records() {
    let cloud = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/hosts"))
        .and(header("X-API-KEY", "cloud-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"id": "h-1", "type": "console", "reportedState": {"hostname": "udm-a"}},
                {"id": "h-2", "type": "console", "reportedState": {"hostname": "udm-b"}},
                {"id": "h-3", "type": "console", "reportedState": {"hostname": "udm-c"}}
            ]
        })))
        .expect(1)
        .mount(&cloud)
        .await;

    let server = McpServer::new(Catalog::new(vec![cloud_tools(&cloud.uri())]));
    let resp = server.handle_request(call("list_hosts", json!({}))).await;

    let result = resp.result.unwrap();
    assert_eq!(result["isError"], json!(false));
    let text = result["content"][0]["text"].as_str().unwrap();
    assert!(text.starts_with("Found 3 host(s):"));
    assert!(text.contains("udm-a") && text.contains("udm-b") && text.contains("udm-c"));
}

#[tokio::test]
async fn invalid_arguments_never_reach_the_backend() {
    let network = MockServer::start().await;
    // Any request hitting the mock fails the expect(0) assertion on drop.
    Mock::given(method("POST"))
        .and(path("/v1/sites/s-1/networks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&network)
        .await;

    let server = McpServer::new(Catalog::new(vec![network_tools(&network.uri())]));

    // Missing the required body entirely.
    let resp = server
        .handle_request(call("network_create_network", json!({"site_id": "s-1"})))
        .await;
    let err = resp.error.unwrap();
    assert_eq!(err.code, -32602);
    assert!(err.message.contains("data"));

    // Wrong type for the body.
    let resp = server
        .handle_request(call(
            "network_create_network",
            json!({"site_id": "s-1", "data": "not-an-object"}),
        ))
        .await;
    assert_eq!(resp.error.unwrap().code, -32602);

    // Out-of-range pagination limit on a list tool.
    let resp = server
        .handle_request(call(
            "network_list_devices",
            json!({"site_id": "s-1", "limit": 9000}),
        ))
        .await;
    assert_eq!(resp.error.unwrap().code, -32602);
}

#[tokio::test]
async fn create_network_posts_once_and_confirms_with_created_id() {
    let network = MockServer::start().await;
    let body = json!({"name": "iot", "vlanId": 42});
    Mock::given(method("POST"))
        .and(path("/v1/sites/s-1/networks"))
        .and(header("X-API-KEY", "net-key"))
        .and(body_json(&body))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": "net-77", "name": "iot", "vlanId": 42})),
        )
        .expect(1)
        .mount(&network)
        .await;

    let server = McpServer::new(Catalog::new(vec![network_tools(&network.uri())]));
    let resp = server
        .handle_request(call(
            "network_create_network",
            json!({"site_id": "s-1", "data": body}),
        ))
        .await;

    let result = resp.result.unwrap();
    assert_eq!(result["isError"], json!(false));
    let text = result["content"][0]["text"].as_str().unwrap();
    assert!(text.contains("net-77"));
}

#[tokio::test]
async fn backend_404_surfaces_status_and_message_without_retry() {
    let cloud = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/hosts/h-404"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"message": "host not found", "traceId": "tr-9"})),
        )
        .expect(1)
        .mount(&cloud)
        .await;

    let server = McpServer::new(Catalog::new(vec![cloud_tools(&cloud.uri())]));
    let resp = server
        .handle_request(call("get_host", json!({"host_id": "h-404"})))
        .await;

    let result = resp.result.unwrap();
    assert_eq!(result["isError"], json!(true));
    let text = result["content"][0]["text"].as_str().unwrap();
    assert!(text.contains("Error 404: host not found"));
    assert!(text.contains("Trace ID: tr-9"));
}

#[tokio::test]
async fn composite_network_info_merges_info_and_sites() {
    let network = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/info"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"applicationVersion": "9.0.108"})),
        )
        .expect(1)
        .mount(&network)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/sites"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "s-1", "name": "Default"}],
            "offset": 0,
            "totalCount": 1
        })))
        .expect(1)
        .mount(&network)
        .await;

    let server = McpServer::new(Catalog::new(vec![network_tools(&network.uri())]));
    let resp = server.handle_request(call("network_info", json!({}))).await;

    let result = resp.result.unwrap();
    let text = result["content"][0]["text"].as_str().unwrap();
    assert!(text.contains("## Application Info"));
    assert!(text.contains("9.0.108"));
    assert!(text.contains("**Default** (ID: `s-1`)"));
}
