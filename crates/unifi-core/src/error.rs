//! Error taxonomy shared by all backend clients.

use serde_json::Value;

/// Result type for gateway operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced by the UniFi backends and the configuration layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Invalid or missing configuration. Fatal at startup.
    #[error("configuration error: {0}")]
    Config(String),

    /// The backend answered with a non-2xx status.
    #[error("UniFi API error {status}: {message}")]
    Api {
        status: u16,
        message: String,
        trace_id: Option<String>,
    },

    /// The backend could not be reached (timeout, refused connection, DNS).
    #[error("connection error: {0}")]
    Connectivity(String),

    /// The backend returned a body that is not valid JSON.
    #[error("invalid JSON in response: {0}")]
    Json(#[from] serde_json::Error),
}

impl ApiError {
    /// Build an `Api` error from a status code and the raw response body.
    ///
    /// The Site Manager and Network APIs put their human-readable error in
    /// `message`, older console firmware uses `error`; anything else falls
    /// back to the raw body text. A `traceId`, when present, is kept so the
    /// caller can quote it to UniFi support.
    pub fn from_response(status: u16, body: &str) -> Self {
        let (message, trace_id) = match serde_json::from_str::<Value>(body) {
            Ok(data) => {
                let message = data
                    .get("message")
                    .and_then(Value::as_str)
                    .filter(|m| !m.is_empty())
                    .or_else(|| data.get("error").and_then(Value::as_str))
                    .filter(|m| !m.is_empty())
                    .map(str::to_string)
                    .unwrap_or_else(|| body.to_string());
                let trace_id = data
                    .get("traceId")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                (message, trace_id)
            }
            Err(_) => (body.to_string(), None),
        };

        Self::Api {
            status,
            message,
            trace_id,
        }
    }

    /// Build the rate-limit variant of `Api`, carrying the server's
    /// `Retry-After` hint in the message.
    pub fn rate_limited(retry_after: Option<&str>) -> Self {
        Self::Api {
            status: 429,
            message: format!(
                "Rate limited. Retry after {} seconds.",
                retry_after.unwrap_or("unknown")
            ),
            trace_id: None,
        }
    }

    /// Status code of the backend reply, when this is an `Api` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_response_extracts_message_and_trace_id() {
        let err = ApiError::from_response(
            404,
            r#"{"message": "host not found", "traceId": "abc-123"}"#,
        );
        match err {
            ApiError::Api {
                status,
                message,
                trace_id,
            } => {
                assert_eq!(status, 404);
                assert_eq!(message, "host not found");
                assert_eq!(trace_id.as_deref(), Some("abc-123"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn from_response_falls_back_to_error_field() {
        let err = ApiError::from_response(400, r#"{"error": "bad vlan id"}"#);
        assert_eq!(err.to_string(), "UniFi API error 400: bad vlan id");
    }

    #[test]
    fn from_response_keeps_raw_body_when_not_json() {
        let err = ApiError::from_response(502, "Bad Gateway");
        assert_eq!(err.to_string(), "UniFi API error 502: Bad Gateway");
    }

    #[test]
    fn rate_limited_includes_retry_after() {
        let err = ApiError::rate_limited(Some("17"));
        assert_eq!(err.status(), Some(429));
        assert!(err.to_string().contains("Retry after 17 seconds"));
    }
}
