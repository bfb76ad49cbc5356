//! Client for the UniFi Network API on a local console.

use crate::http;
use serde_json::Value;
use tracing::debug;
use unifi_core::{ApiResult, ConsoleSettings};

/// Async client for a console's Network API at
/// `https://<host>/proxy/network/integration`.
#[derive(Debug, Clone)]
pub struct NetworkClient {
    http: reqwest::Client,
    base_url: String,
}

impl NetworkClient {
    pub fn new(settings: &ConsoleSettings) -> ApiResult<Self> {
        let http = http::build_client(&settings.api_key, settings.timeout, settings.verify_tls)?;
        Ok(Self {
            http,
            base_url: format!("https://{}/proxy/network/integration", settings.host),
        })
    }

    /// Test-only constructor pointing at an arbitrary base URL.
    #[cfg(any(test, feature = "test-support"))]
    pub fn with_base_url(settings: &ConsoleSettings, base_url: &str) -> ApiResult<Self> {
        let http = http::build_client(&settings.api_key, settings.timeout, settings.verify_tls)?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_paged(&self, path: &str, offset: u32, limit: u32) -> ApiResult<Value> {
        debug!(path, offset, limit, "network GET");
        http::execute(
            self.http
                .get(self.url(path))
                .query(&[("offset", offset), ("limit", limit)]),
        )
        .await
    }

    async fn get(&self, path: &str) -> ApiResult<Value> {
        debug!(path, "network GET");
        http::execute(self.http.get(self.url(path))).await
    }

    async fn post(&self, path: &str, body: &Value) -> ApiResult<Value> {
        debug!(path, "network POST");
        http::execute(self.http.post(self.url(path)).json(body)).await
    }

    async fn put(&self, path: &str, body: &Value) -> ApiResult<Value> {
        debug!(path, "network PUT");
        http::execute(self.http.put(self.url(path)).json(body)).await
    }

    async fn delete(&self, path: &str) -> ApiResult<Value> {
        debug!(path, "network DELETE");
        http::execute(self.http.delete(self.url(path))).await
    }

    // --- Info & sites ---

    pub async fn get_info(&self) -> ApiResult<Value> {
        self.get("/v1/info").await
    }

    pub async fn list_sites(&self, offset: u32, limit: u32) -> ApiResult<Value> {
        self.get_paged("/v1/sites", offset, limit).await
    }

    // --- Devices ---

    pub async fn list_devices(&self, site_id: &str, offset: u32, limit: u32) -> ApiResult<Value> {
        self.get_paged(&format!("/v1/sites/{site_id}/devices"), offset, limit)
            .await
    }

    pub async fn get_device(&self, site_id: &str, device_id: &str) -> ApiResult<Value> {
        self.get(&format!("/v1/sites/{site_id}/devices/{device_id}"))
            .await
    }

    pub async fn get_device_statistics(&self, site_id: &str, device_id: &str) -> ApiResult<Value> {
        self.get(&format!(
            "/v1/sites/{site_id}/devices/{device_id}/statistics/latest"
        ))
        .await
    }

    pub async fn execute_device_action(
        &self,
        site_id: &str,
        device_id: &str,
        action: &Value,
    ) -> ApiResult<Value> {
        self.post(
            &format!("/v1/sites/{site_id}/devices/{device_id}/actions"),
            action,
        )
        .await
    }

    // --- Clients ---

    pub async fn list_clients(&self, site_id: &str, offset: u32, limit: u32) -> ApiResult<Value> {
        self.get_paged(&format!("/v1/sites/{site_id}/clients"), offset, limit)
            .await
    }

    pub async fn get_client(&self, site_id: &str, client_id: &str) -> ApiResult<Value> {
        self.get(&format!("/v1/sites/{site_id}/clients/{client_id}"))
            .await
    }

    pub async fn execute_client_action(
        &self,
        site_id: &str,
        client_id: &str,
        action: &Value,
    ) -> ApiResult<Value> {
        self.post(
            &format!("/v1/sites/{site_id}/clients/{client_id}/actions"),
            action,
        )
        .await
    }

    // --- Networks ---

    pub async fn list_networks(&self, site_id: &str, offset: u32, limit: u32) -> ApiResult<Value> {
        self.get_paged(&format!("/v1/sites/{site_id}/networks"), offset, limit)
            .await
    }

    pub async fn get_network(&self, site_id: &str, network_id: &str) -> ApiResult<Value> {
        self.get(&format!("/v1/sites/{site_id}/networks/{network_id}"))
            .await
    }

    pub async fn create_network(&self, site_id: &str, data: &Value) -> ApiResult<Value> {
        self.post(&format!("/v1/sites/{site_id}/networks"), data).await
    }

    pub async fn update_network(
        &self,
        site_id: &str,
        network_id: &str,
        data: &Value,
    ) -> ApiResult<Value> {
        self.put(&format!("/v1/sites/{site_id}/networks/{network_id}"), data)
            .await
    }

    pub async fn delete_network(&self, site_id: &str, network_id: &str) -> ApiResult<Value> {
        self.delete(&format!("/v1/sites/{site_id}/networks/{network_id}"))
            .await
    }

    // --- WiFi broadcasts ---

    pub async fn list_wifi(&self, site_id: &str, offset: u32, limit: u32) -> ApiResult<Value> {
        self.get_paged(&format!("/v1/sites/{site_id}/wifi/broadcasts"), offset, limit)
            .await
    }

    pub async fn get_wifi(&self, site_id: &str, wifi_id: &str) -> ApiResult<Value> {
        self.get(&format!("/v1/sites/{site_id}/wifi/broadcasts/{wifi_id}"))
            .await
    }

    pub async fn create_wifi(&self, site_id: &str, data: &Value) -> ApiResult<Value> {
        self.post(&format!("/v1/sites/{site_id}/wifi/broadcasts"), data)
            .await
    }

    pub async fn update_wifi(&self, site_id: &str, wifi_id: &str, data: &Value) -> ApiResult<Value> {
        self.put(
            &format!("/v1/sites/{site_id}/wifi/broadcasts/{wifi_id}"),
            data,
        )
        .await
    }

    pub async fn delete_wifi(&self, site_id: &str, wifi_id: &str) -> ApiResult<Value> {
        self.delete(&format!("/v1/sites/{site_id}/wifi/broadcasts/{wifi_id}"))
            .await
    }

    // --- Firewall ---

    pub async fn list_firewall_zones(
        &self,
        site_id: &str,
        offset: u32,
        limit: u32,
    ) -> ApiResult<Value> {
        self.get_paged(&format!("/v1/sites/{site_id}/firewall/zones"), offset, limit)
            .await
    }

    pub async fn list_firewall_policies(
        &self,
        site_id: &str,
        offset: u32,
        limit: u32,
    ) -> ApiResult<Value> {
        self.get_paged(
            &format!("/v1/sites/{site_id}/firewall/policies"),
            offset,
            limit,
        )
        .await
    }

    pub async fn create_firewall_policy(&self, site_id: &str, data: &Value) -> ApiResult<Value> {
        self.post(&format!("/v1/sites/{site_id}/firewall/policies"), data)
            .await
    }

    pub async fn update_firewall_policy(
        &self,
        site_id: &str,
        policy_id: &str,
        data: &Value,
    ) -> ApiResult<Value> {
        self.put(
            &format!("/v1/sites/{site_id}/firewall/policies/{policy_id}"),
            data,
        )
        .await
    }

    pub async fn delete_firewall_policy(&self, site_id: &str, policy_id: &str) -> ApiResult<Value> {
        self.delete(&format!("/v1/sites/{site_id}/firewall/policies/{policy_id}"))
            .await
    }

    // --- DNS ---

    pub async fn list_dns_policies(
        &self,
        site_id: &str,
        offset: u32,
        limit: u32,
    ) -> ApiResult<Value> {
        self.get_paged(&format!("/v1/sites/{site_id}/dns/policies"), offset, limit)
            .await
    }

    // --- Hotspot vouchers ---

    pub async fn list_vouchers(&self, site_id: &str, offset: u32, limit: u32) -> ApiResult<Value> {
        self.get_paged(
            &format!("/v1/sites/{site_id}/hotspot/vouchers"),
            offset,
            limit,
        )
        .await
    }

    pub async fn create_vouchers(&self, site_id: &str, data: &Value) -> ApiResult<Value> {
        self.post(&format!("/v1/sites/{site_id}/hotspot/vouchers"), data)
            .await
    }

    pub async fn delete_voucher(&self, site_id: &str, voucher_id: &str) -> ApiResult<Value> {
        self.delete(&format!("/v1/sites/{site_id}/hotspot/vouchers/{voucher_id}"))
            .await
    }

    // --- Supporting resources ---

    pub async fn list_wans(&self, site_id: &str, offset: u32, limit: u32) -> ApiResult<Value> {
        self.get_paged(&format!("/v1/sites/{site_id}/wans"), offset, limit)
            .await
    }

    pub async fn list_vpn_tunnels(
        &self,
        site_id: &str,
        offset: u32,
        limit: u32,
    ) -> ApiResult<Value> {
        self.get_paged(
            &format!("/v1/sites/{site_id}/vpn/site-to-site-tunnels"),
            offset,
            limit,
        )
        .await
    }

    pub async fn list_vpn_servers(
        &self,
        site_id: &str,
        offset: u32,
        limit: u32,
    ) -> ApiResult<Value> {
        self.get_paged(&format!("/v1/sites/{site_id}/vpn/servers"), offset, limit)
            .await
    }

    pub async fn list_radius_profiles(
        &self,
        site_id: &str,
        offset: u32,
        limit: u32,
    ) -> ApiResult<Value> {
        self.get_paged(&format!("/v1/sites/{site_id}/radius/profiles"), offset, limit)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings() -> ConsoleSettings {
        ConsoleSettings {
            host: "unused.local".into(),
            api_key: "net-key".into(),
            verify_tls: true,
            timeout: Duration::from_secs(5),
        }
    }

    #[tokio::test]
    async fn console_base_url_follows_proxy_prefix() {
        let client = NetworkClient::new(&settings()).unwrap();
        assert_eq!(
            client.url("/v1/info"),
            "https://unused.local/proxy/network/integration/v1/info"
        );
    }

    #[tokio::test]
    async fn list_devices_paginates_with_offset_and_limit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/sites/s1/devices"))
            .and(query_param("offset", "10"))
            .and(query_param("limit", "25"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .expect(1)
            .mount(&server)
            .await;

        let client = NetworkClient::with_base_url(&settings(), &server.uri()).unwrap();
        client.list_devices("s1", 10, 25).await.unwrap();
    }

    #[tokio::test]
    async fn create_network_posts_body_once() {
        let server = MockServer::start().await;
        let body = json!({"name": "iot", "vlanId": 42});
        Mock::given(method("POST"))
            .and(path("/v1/sites/s1/networks"))
            .and(body_json(&body))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"id": "n-9", "name": "iot"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = NetworkClient::with_base_url(&settings(), &server.uri()).unwrap();
        let created = client.create_network("s1", &body).await.unwrap();
        assert_eq!(created["id"], json!("n-9"));
    }

    #[tokio::test]
    async fn delete_returns_success_marker_on_204() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/v1/sites/s1/networks/n-9"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = NetworkClient::with_base_url(&settings(), &server.uri()).unwrap();
        let result = client.delete_network("s1", "n-9").await.unwrap();
        assert_eq!(result, json!({"status": "success"}));
    }
}
