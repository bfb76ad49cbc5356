//! Client for the UniFi Site Manager API (cloud, read-only).

use crate::http;
use serde_json::{json, Value};
use tracing::debug;
use unifi_core::{ApiResult, CloudSettings};

/// Async client for the Site Manager API at `https://api.ui.com/v1`.
#[derive(Debug, Clone)]
pub struct CloudClient {
    http: reqwest::Client,
    base_url: String,
}

impl CloudClient {
    pub fn new(settings: &CloudSettings) -> ApiResult<Self> {
        // Cloud endpoints carry a public certificate; always verify.
        let http = http::build_client(&settings.api_key, settings.timeout, true)?;
        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get(&self, path: &str, query: &[(&str, String)]) -> ApiResult<Value> {
        debug!(path, "cloud GET");
        http::execute(self.http.get(self.url(path)).query(query)).await
    }

    fn page_query(page_size: u32, next_token: Option<&str>) -> Vec<(&'static str, String)> {
        let mut query = vec![("pageSize", page_size.to_string())];
        if let Some(token) = next_token {
            query.push(("nextToken", token.to_string()));
        }
        query
    }

    // --- Hosts ---

    pub async fn list_hosts(&self, page_size: u32, next_token: Option<&str>) -> ApiResult<Value> {
        self.get("/hosts", &Self::page_query(page_size, next_token))
            .await
    }

    pub async fn get_host(&self, host_id: &str) -> ApiResult<Value> {
        self.get(&format!("/hosts/{host_id}"), &[]).await
    }

    // --- Sites ---

    pub async fn list_sites(&self, page_size: u32, next_token: Option<&str>) -> ApiResult<Value> {
        self.get("/sites", &Self::page_query(page_size, next_token))
            .await
    }

    // --- Devices ---

    pub async fn list_devices(
        &self,
        host_ids: &[String],
        time: Option<&str>,
        page_size: u32,
        next_token: Option<&str>,
    ) -> ApiResult<Value> {
        let mut query = Self::page_query(page_size, next_token);
        for host_id in host_ids {
            query.push(("hostIds[]", host_id.clone()));
        }
        if let Some(time) = time {
            query.push(("time", time.to_string()));
        }
        self.get("/devices", &query).await
    }

    // --- ISP metrics ---

    pub async fn get_isp_metrics(
        &self,
        metric_type: &str,
        duration: Option<&str>,
        begin_timestamp: Option<&str>,
        end_timestamp: Option<&str>,
    ) -> ApiResult<Value> {
        let mut query = Vec::new();
        if let Some(duration) = duration {
            query.push(("duration", duration.to_string()));
        }
        if let Some(begin) = begin_timestamp {
            query.push(("beginTimestamp", begin.to_string()));
        }
        if let Some(end) = end_timestamp {
            query.push(("endTimestamp", end.to_string()));
        }
        self.get(&format!("/isp-metrics/{metric_type}"), &query).await
    }

    /// Query metrics for specific sites. Each selector carries `hostId` and
    /// `siteId`, optionally its own timestamp window.
    pub async fn query_isp_metrics(&self, metric_type: &str, sites: &Value) -> ApiResult<Value> {
        let path = format!("/isp-metrics/{metric_type}/query");
        debug!(path = %path, "cloud POST");
        http::execute(
            self.http
                .post(self.url(&path))
                .json(&json!({"sites": sites})),
        )
        .await
    }

    // --- SD-WAN ---

    pub async fn list_sdwan_configs(&self) -> ApiResult<Value> {
        self.get("/sd-wan-configs", &[]).await
    }

    pub async fn get_sdwan_config(&self, config_id: &str) -> ApiResult<Value> {
        self.get(&format!("/sd-wan-configs/{config_id}"), &[]).await
    }

    pub async fn get_sdwan_config_status(&self, config_id: &str) -> ApiResult<Value> {
        self.get(&format!("/sd-wan-configs/{config_id}/status"), &[])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings(base_url: &str) -> CloudSettings {
        CloudSettings {
            api_key: "cloud-key".into(),
            base_url: base_url.into(),
            timeout: Duration::from_secs(5),
        }
    }

    #[tokio::test]
    async fn list_hosts_sends_pagination_params() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/hosts"))
            .and(query_param("pageSize", "50"))
            .and(query_param("nextToken", "tok-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .expect(1)
            .mount(&server)
            .await;

        let client = CloudClient::new(&settings(&server.uri())).unwrap();
        client.list_hosts(50, Some("tok-1")).await.unwrap();
    }

    #[tokio::test]
    async fn list_devices_repeats_host_id_filter() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/devices"))
            .and(query_param("hostIds[]", "h1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .mount(&server)
            .await;

        let client = CloudClient::new(&settings(&server.uri())).unwrap();
        client
            .list_devices(&["h1".into()], None, 25, None)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn query_isp_metrics_posts_site_selectors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/isp-metrics/1h/query"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .expect(1)
            .mount(&server)
            .await;

        let client = CloudClient::new(&settings(&server.uri())).unwrap();
        let sites = json!([{"hostId": "h1", "siteId": "s1"}]);
        client.query_isp_metrics("1h", &sites).await.unwrap();
    }
}
