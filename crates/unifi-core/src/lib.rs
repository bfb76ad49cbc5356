//! unifi-core: settings resolution and error taxonomy for the UniFi MCP
//! gateway. No I/O lives here; the HTTP clients are in `unifi-api` and the
//! protocol server in `unifi-mcp`.

pub mod config;
pub mod error;

pub use config::{CloudSettings, ConsoleSettings, Settings};
pub use error::{ApiError, ApiResult};
