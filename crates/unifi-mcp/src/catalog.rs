//! Tool catalog and dispatcher.
//!
//! Each enabled backend contributes a [`ToolSet`]; the [`Catalog`] is
//! assembled once after configuration resolution and never mutated. The
//! dispatcher validates arguments against the declared schema before any
//! backend call is made.

use crate::schema;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;
use unifi_core::{ApiError, ApiResult};

/// A tool descriptor as advertised through `tools/list`.
#[derive(Debug, Clone)]
pub struct ToolDef {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

impl ToolDef {
    pub fn to_json(&self) -> Value {
        serde_json::json!({
            "name": self.name,
            "description": self.description,
            "inputSchema": self.input_schema,
        })
    }
}

/// Capability contract implemented by each backend's client+formatter pair.
///
/// `call` is only invoked with a name from `defs()` and arguments that
/// already passed schema validation.
#[async_trait]
pub trait ToolSet: Send + Sync {
    fn defs(&self) -> Vec<ToolDef>;
    async fn call(&self, name: &str, args: &Value) -> ApiResult<String>;
}

/// Why a dispatch did not produce a formatted result.
#[derive(Debug)]
pub enum DispatchError {
    /// Name not present in the catalog (e.g. the backend is disabled).
    UnknownTool(String),
    /// Arguments failed schema validation; no backend call was made.
    InvalidArgs(String),
    /// The backend call itself failed.
    Backend(ApiError),
}

/// Read-only registry of all tools from the enabled backends.
pub struct Catalog {
    tools: Vec<ToolDef>,
    // tool name -> (index into `sets`, index into `tools`)
    index: HashMap<&'static str, (usize, usize)>,
    sets: Vec<Arc<dyn ToolSet>>,
}

impl Catalog {
    pub fn new(sets: Vec<Arc<dyn ToolSet>>) -> Self {
        let mut tools = Vec::new();
        let mut index = HashMap::new();
        for (set_idx, set) in sets.iter().enumerate() {
            for def in set.defs() {
                index.insert(def.name, (set_idx, tools.len()));
                tools.push(def);
            }
        }
        Self { tools, index, sets }
    }

    /// All tool descriptors, in registration order.
    pub fn tools(&self) -> &[ToolDef] {
        &self.tools
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Validate and dispatch a tool invocation.
    pub async fn dispatch(&self, name: &str, args: &Value) -> Result<String, DispatchError> {
        let Some(&(set_idx, tool_idx)) = self.index.get(name) else {
            return Err(DispatchError::UnknownTool(name.to_string()));
        };

        let def = &self.tools[tool_idx];
        schema::validate(&def.input_schema, args)
            .map_err(|msg| DispatchError::InvalidArgs(format!("Invalid arguments for {name}: {msg}")))?;

        debug!(tool = name, "dispatching");
        self.sets[set_idx]
            .call(name, args)
            .await
            .map_err(DispatchError::Backend)
    }
}
