//! Response formatters: raw backend JSON in, condensed text out.
//!
//! These are pure functions. Missing fields render as `N/A` instead of
//! failing; the same input always yields the same output.

pub mod cloud;
pub mod network;
pub mod protect;

use serde_json::Value;

/// Render a JSON value for inline display: strings unquoted, null as N/A.
pub(crate) fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "N/A".to_string(),
        other => other.to_string(),
    }
}

/// Fetch `key` from an object and render it, defaulting to `N/A`.
pub(crate) fn field(value: &Value, key: &str) -> String {
    value.get(key).map(display).unwrap_or_else(|| "N/A".into())
}

/// Fetch a nested value by JSON pointer and render it, defaulting to `N/A`.
pub(crate) fn pointer(value: &Value, path: &str) -> String {
    value
        .pointer(path)
        .map(display)
        .unwrap_or_else(|| "N/A".into())
}

/// Pretty-printed JSON for detail views.
pub(crate) fn json_detail(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// The `data` array of an envelope, or the value itself when the backend
/// returns a bare array (Protect does this).
pub(crate) fn items(value: &Value) -> Vec<&Value> {
    let list = match value {
        Value::Array(entries) => Some(entries),
        _ => value.get("data").and_then(Value::as_array),
    };
    list.map(|entries| entries.iter().collect()).unwrap_or_default()
}
