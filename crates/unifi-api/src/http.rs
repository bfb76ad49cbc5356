//! Shared request plumbing for the three backend clients.
//!
//! Every backend authenticates with an `X-API-KEY` header and speaks JSON.
//! Errors map onto the `ApiError` taxonomy: transport failures become
//! `Connectivity`, non-2xx replies become `Api` with the body's message,
//! and nothing is ever retried here.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde_json::{json, Value};
use std::time::Duration;
use unifi_core::{ApiError, ApiResult};

const API_KEY_HEADER: &str = "X-API-KEY";

/// Build a `reqwest::Client` with the backend's auth header and timeout.
///
/// `verify_tls = false` accepts the self-signed certificates local consoles
/// ship with; the cloud client always passes `true`.
pub(crate) fn build_client(
    api_key: &str,
    timeout: Duration,
    verify_tls: bool,
) -> ApiResult<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(
        API_KEY_HEADER,
        HeaderValue::from_str(api_key)
            .map_err(|_| ApiError::Config("API key contains invalid header characters".into()))?,
    );
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    reqwest::Client::builder()
        .default_headers(headers)
        .timeout(timeout)
        .danger_accept_invalid_certs(!verify_tls)
        .build()
        .map_err(|e| ApiError::Config(format!("failed to build HTTP client: {e}")))
}

/// Send a prepared request and map the reply onto the error taxonomy.
pub(crate) async fn execute(request: reqwest::RequestBuilder) -> ApiResult<Value> {
    let response = request.send().await.map_err(connectivity)?;
    let status = response.status();

    if status.as_u16() == 429 {
        let retry_after = response
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        return Err(ApiError::rate_limited(retry_after.as_deref()));
    }

    // Deletes and actions answer 204 with no body.
    if status.as_u16() == 204 {
        return Ok(json!({"status": "success"}));
    }

    let body = response.text().await.map_err(connectivity)?;

    if status.as_u16() >= 400 {
        return Err(ApiError::from_response(status.as_u16(), &body));
    }

    serde_json::from_str(&body).map_err(ApiError::Json)
}

fn connectivity(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Connectivity(format!("request timed out: {err}"))
    } else {
        ApiError::Connectivity(err.to_string())
    }
}
