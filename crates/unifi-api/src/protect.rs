//! Client for the UniFi Protect API on a local console.
//!
//! Unlike the Network API, many Protect endpoints return bare JSON arrays
//! rather than a `{"data": [...]}` envelope, and mutations use PATCH.

use crate::http;
use serde_json::Value;
use tracing::debug;
use unifi_core::{ApiResult, ConsoleSettings};

/// Async client for a console's Protect API at
/// `https://<host>/proxy/protect/api`.
#[derive(Debug, Clone)]
pub struct ProtectClient {
    http: reqwest::Client,
    base_url: String,
}

impl ProtectClient {
    pub fn new(settings: &ConsoleSettings) -> ApiResult<Self> {
        let http = http::build_client(&settings.api_key, settings.timeout, settings.verify_tls)?;
        Ok(Self {
            http,
            base_url: format!("https://{}/proxy/protect/api", settings.host),
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

    async fn get(&self, path: &str) -> ApiResult<Value> {
        debug!(path, "protect GET");
        http::execute(self.http.get(self.url(path))).await
    }

    async fn post(&self, path: &str, body: &Value) -> ApiResult<Value> {
        debug!(path, "protect POST");
        http::execute(self.http.post(self.url(path)).json(body)).await
    }

    async fn patch(&self, path: &str, body: &Value) -> ApiResult<Value> {
        debug!(path, "protect PATCH");
        http::execute(self.http.patch(self.url(path)).json(body)).await
    }

    // --- Application & NVR ---

    pub async fn get_app_info(&self) -> ApiResult<Value> {
        self.get("/v1/meta/info").await
    }

    pub async fn get_nvr(&self) -> ApiResult<Value> {
        self.get("/v1/nvrs").await
    }

    // --- Cameras ---

    pub async fn list_cameras(&self) -> ApiResult<Value> {
        self.get("/v1/cameras").await
    }

    pub async fn get_camera(&self, camera_id: &str) -> ApiResult<Value> {
        self.get(&format!("/v1/cameras/{camera_id}")).await
    }

    pub async fn update_camera(&self, camera_id: &str, data: &Value) -> ApiResult<Value> {
        self.patch(&format!("/v1/cameras/{camera_id}"), data).await
    }

    // --- Lights ---

    pub async fn list_lights(&self) -> ApiResult<Value> {
        self.get("/v1/lights").await
    }

    pub async fn get_light(&self, light_id: &str) -> ApiResult<Value> {
        self.get(&format!("/v1/lights/{light_id}")).await
    }

    pub async fn update_light(&self, light_id: &str, data: &Value) -> ApiResult<Value> {
        self.patch(&format!("/v1/lights/{light_id}"), data).await
    }

    // --- Sensors ---

    pub async fn list_sensors(&self) -> ApiResult<Value> {
        self.get("/v1/sensors").await
    }

    pub async fn get_sensor(&self, sensor_id: &str) -> ApiResult<Value> {
        self.get(&format!("/v1/sensors/{sensor_id}")).await
    }

    pub async fn update_sensor(&self, sensor_id: &str, data: &Value) -> ApiResult<Value> {
        self.patch(&format!("/v1/sensors/{sensor_id}"), data).await
    }

    // --- Chimes ---

    pub async fn list_chimes(&self) -> ApiResult<Value> {
        self.get("/v1/chimes").await
    }

    pub async fn get_chime(&self, chime_id: &str) -> ApiResult<Value> {
        self.get(&format!("/v1/chimes/{chime_id}")).await
    }

    pub async fn update_chime(&self, chime_id: &str, data: &Value) -> ApiResult<Value> {
        self.patch(&format!("/v1/chimes/{chime_id}"), data).await
    }

    // --- Door locks ---

    pub async fn list_doorlocks(&self) -> ApiResult<Value> {
        self.get("/v1/doorlocks").await
    }

    pub async fn get_doorlock(&self, doorlock_id: &str) -> ApiResult<Value> {
        self.get(&format!("/v1/doorlocks/{doorlock_id}")).await
    }

    pub async fn update_doorlock(&self, doorlock_id: &str, data: &Value) -> ApiResult<Value> {
        self.patch(&format!("/v1/doorlocks/{doorlock_id}"), data)
            .await
    }

    // --- Events ---

    /// Up to 10K events, newest first.
    pub async fn list_events(&self) -> ApiResult<Value> {
        self.get("/v1/events").await
    }

    // --- Liveviews ---

    pub async fn list_liveviews(&self) -> ApiResult<Value> {
        self.get("/v1/liveviews").await
    }

    pub async fn get_liveview(&self, liveview_id: &str) -> ApiResult<Value> {
        self.get(&format!("/v1/liveviews/{liveview_id}")).await
    }

    pub async fn create_liveview(&self, data: &Value) -> ApiResult<Value> {
        self.post("/v1/liveviews", data).await
    }

    pub async fn update_liveview(&self, liveview_id: &str, data: &Value) -> ApiResult<Value> {
        self.patch(&format!("/v1/liveviews/{liveview_id}"), data)
            .await
    }

    // --- Viewers ---

    pub async fn list_viewers(&self) -> ApiResult<Value> {
        self.get("/v1/viewers").await
    }

    pub async fn get_viewer(&self, viewer_id: &str) -> ApiResult<Value> {
        self.get(&format!("/v1/viewers/{viewer_id}")).await
    }

    pub async fn update_viewer(&self, viewer_id: &str, data: &Value) -> ApiResult<Value> {
        self.patch(&format!("/v1/viewers/{viewer_id}"), data).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings() -> ConsoleSettings {
        ConsoleSettings {
            host: "nvr.local".into(),
            api_key: "protect-key".into(),
            verify_tls: true,
            timeout: Duration::from_secs(5),
        }
    }

    #[tokio::test]
    async fn console_base_url_follows_proxy_prefix() {
        let client = ProtectClient::new(&settings()).unwrap();
        assert_eq!(
            client.url("/v1/cameras"),
            "https://nvr.local/proxy/protect/api/v1/cameras"
        );
    }

    #[tokio::test]
    async fn list_cameras_accepts_bare_array_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/cameras"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{"id": "c1", "name": "Porch"}])),
            )
            .mount(&server)
            .await;

        let client = ProtectClient::with_base_url(&settings(), &server.uri()).unwrap();
        let cameras = client.list_cameras().await.unwrap();
        assert_eq!(cameras.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_camera_uses_patch() {
        let server = MockServer::start().await;
        let body = json!({"name": "Driveway"});
        Mock::given(method("PATCH"))
            .and(path("/v1/cameras/c1"))
            .and(body_json(&body))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"id": "c1", "name": "Driveway"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = ProtectClient::with_base_url(&settings(), &server.uri()).unwrap();
        client.update_camera("c1", &body).await.unwrap();
    }
}
