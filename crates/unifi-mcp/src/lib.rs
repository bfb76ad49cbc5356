//! unifi-mcp: Model Context Protocol gateway for UniFi equipment.
//!
//! Exposes the cloud Site Manager API and the local Network and Protect
//! console APIs as MCP tools, over stdio or HTTP transports.
//!
//! Architecture:
//! transport -> McpServer -> Catalog (validate + dispatch) -> backend
//! client -> formatter -> back out.

pub mod catalog;
pub mod protocol;
pub mod schema;
pub mod server;
pub mod tools;
pub mod transport;

pub use catalog::{Catalog, DispatchError, ToolDef, ToolSet};
pub use protocol::{JsonRpcError, McpRequest, McpResponse};
pub use server::{McpServer, PROTOCOL_VERSION, SERVER_NAME, SERVER_VERSION};
