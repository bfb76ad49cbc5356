//! unifi-api: HTTP clients and response formatters for the three UniFi
//! backends (cloud Site Manager, local Network console, local Protect
//! console).
//!
//! Each client wraps a pooled `reqwest::Client` carrying the backend's
//! `X-API-KEY` header and timeout; one method per remote endpoint, raw
//! `serde_json::Value` in and out. The `format` module turns those payloads
//! into the condensed text the MCP tools return.

pub mod cloud;
pub mod format;
mod http;
pub mod network;
pub mod protect;

pub use cloud::CloudClient;
pub use network::NetworkClient;
pub use protect::ProtectClient;
