//! Environment-driven settings for the three UniFi backends.
//!
//! Resolution happens once at process start. The cloud Site Manager API is
//! always configured; the two local-console backends are enabled only when
//! their host variable is set. Each console may override the shared API key.

use crate::error::{ApiError, ApiResult};
use std::time::Duration;

/// Default base URL for the cloud Site Manager API.
pub const DEFAULT_BASE_URL: &str = "https://api.ui.com/v1";
/// Default request timeout in seconds, shared by all backends.
pub const DEFAULT_TIMEOUT_SECS: f64 = 30.0;

pub const ENV_API_KEY: &str = "UNIFI_API_KEY";
pub const ENV_BASE_URL: &str = "UNIFI_API_BASE_URL";
pub const ENV_TIMEOUT: &str = "UNIFI_API_TIMEOUT";
pub const ENV_NETWORK_HOST: &str = "UNIFI_NETWORK_HOST";
pub const ENV_NETWORK_API_KEY: &str = "UNIFI_NETWORK_API_KEY";
pub const ENV_NETWORK_VERIFY_SSL: &str = "UNIFI_NETWORK_VERIFY_SSL";
pub const ENV_PROTECT_HOST: &str = "UNIFI_PROTECT_HOST";
pub const ENV_PROTECT_API_KEY: &str = "UNIFI_PROTECT_API_KEY";
pub const ENV_PROTECT_VERIFY_SSL: &str = "UNIFI_PROTECT_VERIFY_SSL";

/// Settings for the cloud Site Manager API.
#[derive(Debug, Clone)]
pub struct CloudSettings {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

/// Settings for a local console API (Network or Protect).
#[derive(Debug, Clone)]
pub struct ConsoleSettings {
    pub host: String,
    pub api_key: String,
    pub verify_tls: bool,
    pub timeout: Duration,
}

/// Immutable settings for all backends, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub cloud: CloudSettings,
    pub network: Option<ConsoleSettings>,
    pub protect: Option<ConsoleSettings>,
}

impl Settings {
    /// Resolve settings from the process environment.
    pub fn from_env() -> ApiResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings through an arbitrary lookup function.
    pub fn from_lookup<F>(lookup: F) -> ApiResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = non_empty(lookup(ENV_API_KEY)).ok_or_else(|| {
            ApiError::Config(format!(
                "UniFi API key is required. Set the {ENV_API_KEY} environment variable."
            ))
        })?;

        let base_url = non_empty(lookup(ENV_BASE_URL))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let timeout = parse_timeout(lookup(ENV_TIMEOUT))?;

        let network = console_settings(
            &lookup,
            &api_key,
            timeout,
            ENV_NETWORK_HOST,
            ENV_NETWORK_API_KEY,
            ENV_NETWORK_VERIFY_SSL,
        );
        let protect = console_settings(
            &lookup,
            &api_key,
            timeout,
            ENV_PROTECT_HOST,
            ENV_PROTECT_API_KEY,
            ENV_PROTECT_VERIFY_SSL,
        );

        Ok(Self {
            cloud: CloudSettings {
                api_key,
                base_url,
                timeout,
            },
            network,
            protect,
        })
    }
}

fn console_settings<F>(
    lookup: &F,
    shared_key: &str,
    timeout: Duration,
    host_var: &str,
    key_var: &str,
    verify_var: &str,
) -> Option<ConsoleSettings>
where
    F: Fn(&str) -> Option<String>,
{
    let host = non_empty(lookup(host_var))?;
    let api_key = non_empty(lookup(key_var)).unwrap_or_else(|| shared_key.to_string());
    let verify_tls = lookup(verify_var)
        .map(|v| v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    Some(ConsoleSettings {
        host,
        api_key,
        verify_tls,
        timeout,
    })
}

fn parse_timeout(raw: Option<String>) -> ApiResult<Duration> {
    let secs = match non_empty(raw) {
        Some(value) => value.parse::<f64>().map_err(|_| {
            ApiError::Config(format!("{ENV_TIMEOUT} must be a number of seconds, got {value:?}"))
        })?,
        None => DEFAULT_TIMEOUT_SECS,
    };
    if !secs.is_finite() || secs <= 0.0 {
        return Err(ApiError::Config(format!(
            "{ENV_TIMEOUT} must be a positive number of seconds"
        )));
    }
    Ok(Duration::from_secs_f64(secs))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = pairs.iter().copied().collect();
        move |key| map.get(key).map(|v| v.to_string())
    }

    #[test]
    fn missing_api_key_is_fatal() {
        let err = Settings::from_lookup(env(&[])).unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
        assert!(err.to_string().contains(ENV_API_KEY));
    }

    #[test]
    fn cloud_only_defaults() {
        let settings = Settings::from_lookup(env(&[(ENV_API_KEY, "key-1")])).unwrap();
        assert_eq!(settings.cloud.api_key, "key-1");
        assert_eq!(settings.cloud.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.cloud.timeout, Duration::from_secs(30));
        assert!(settings.network.is_none());
        assert!(settings.protect.is_none());
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let settings = Settings::from_lookup(env(&[
            (ENV_API_KEY, "key-1"),
            (ENV_BASE_URL, "https://gateway.example/v1/"),
        ]))
        .unwrap();
        assert_eq!(settings.cloud.base_url, "https://gateway.example/v1");
    }

    #[test]
    fn network_enabled_by_host_with_key_fallback() {
        let settings = Settings::from_lookup(env(&[
            (ENV_API_KEY, "shared"),
            (ENV_NETWORK_HOST, "192.168.1.1"),
        ]))
        .unwrap();
        let network = settings.network.unwrap();
        assert_eq!(network.host, "192.168.1.1");
        assert_eq!(network.api_key, "shared");
        assert!(!network.verify_tls);
    }

    #[test]
    fn per_console_key_override_and_verify_flag() {
        let settings = Settings::from_lookup(env(&[
            (ENV_API_KEY, "shared"),
            (ENV_PROTECT_HOST, "nvr.local"),
            (ENV_PROTECT_API_KEY, "protect-key"),
            (ENV_PROTECT_VERIFY_SSL, "TRUE"),
        ]))
        .unwrap();
        let protect = settings.protect.unwrap();
        assert_eq!(protect.api_key, "protect-key");
        assert!(protect.verify_tls);
        assert!(settings.network.is_none());
    }

    #[test]
    fn empty_host_leaves_console_disabled() {
        let settings = Settings::from_lookup(env(&[
            (ENV_API_KEY, "shared"),
            (ENV_NETWORK_HOST, "  "),
        ]))
        .unwrap();
        assert!(settings.network.is_none());
    }

    #[test]
    fn timeout_is_parsed_and_validated() {
        let settings = Settings::from_lookup(env(&[
            (ENV_API_KEY, "k"),
            (ENV_TIMEOUT, "2.5"),
        ]))
        .unwrap();
        assert_eq!(settings.cloud.timeout, Duration::from_millis(2500));

        let err = Settings::from_lookup(env(&[
            (ENV_API_KEY, "k"),
            (ENV_TIMEOUT, "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));

        let err = Settings::from_lookup(env(&[
            (ENV_API_KEY, "k"),
            (ENV_TIMEOUT, "-1"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }
}
