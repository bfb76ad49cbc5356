//! Backend tool sets: one module per API, binding client methods to
//! response formatters.

mod cloud;
mod network;
mod protect;

pub use cloud::CloudTools;
pub use network::NetworkTools;
pub use protect::ProtectTools;

use serde_json::{json, Value};

pub(crate) fn object_schema(properties: Value, required: &[&str]) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

// Argument accessors. Dispatch validates against the declared schema first,
// so these only see well-typed input; defaults cover the optional fields.

pub(crate) fn str_arg<'a>(args: &'a Value, key: &str) -> &'a str {
    args.get(key).and_then(Value::as_str).unwrap_or_default()
}

pub(crate) fn opt_str_arg<'a>(args: &'a Value, key: &str) -> Option<&'a str> {
    args.get(key).and_then(Value::as_str)
}

pub(crate) fn u32_arg(args: &Value, key: &str, default: u32) -> u32 {
    args.get(key)
        .and_then(Value::as_u64)
        .map(|v| v as u32)
        .unwrap_or(default)
}

pub(crate) fn bool_arg(args: &Value, key: &str) -> bool {
    args.get(key).and_then(Value::as_bool).unwrap_or(false)
}

pub(crate) fn value_arg(args: &Value, key: &str) -> Value {
    args.get(key).cloned().unwrap_or_else(|| json!({}))
}

pub(crate) fn str_list_arg(args: &Value, key: &str) -> Vec<String> {
    args.get(key)
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, ToolSet};
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::time::Duration;
    use unifi_api::{CloudClient, NetworkClient, ProtectClient};
    use unifi_core::{CloudSettings, ConsoleSettings};

    fn full_catalog() -> Catalog {
        let cloud = CloudSettings {
            api_key: "k".into(),
            base_url: "https://api.ui.com/v1".into(),
            timeout: Duration::from_secs(5),
        };
        let console = ConsoleSettings {
            host: "console.local".into(),
            api_key: "k".into(),
            verify_tls: false,
            timeout: Duration::from_secs(5),
        };
        let sets: Vec<Arc<dyn ToolSet>> = vec![
            Arc::new(CloudTools::new(CloudClient::new(&cloud).unwrap())),
            Arc::new(NetworkTools::new(NetworkClient::new(&console).unwrap())),
            Arc::new(ProtectTools::new(ProtectClient::new(&console).unwrap())),
        ];
        Catalog::new(sets)
    }

    #[test]
    fn tool_names_are_unique_across_backends() {
        let catalog = full_catalog();
        let names: HashSet<&str> = catalog.tools().iter().map(|t| t.name).collect();
        assert_eq!(names.len(), catalog.tools().len());
        assert!(catalog.contains("list_hosts"));
        assert!(catalog.contains("network_create_network"));
        assert!(catalog.contains("protect_list_cameras"));
    }

    #[test]
    fn every_tool_declares_an_object_schema() {
        for def in full_catalog().tools() {
            assert_eq!(
                def.input_schema["type"],
                json!("object"),
                "tool {} schema is not an object",
                def.name
            );
            assert!(
                def.input_schema.get("properties").is_some(),
                "tool {} has no properties table",
                def.name
            );
            assert!(!def.description.is_empty());
        }
    }

    #[test]
    fn backend_prefixes_partition_the_catalog() {
        let catalog = full_catalog();
        let network = catalog
            .tools()
            .iter()
            .filter(|t| t.name.starts_with("network_"))
            .count();
        let protect = catalog
            .tools()
            .iter()
            .filter(|t| t.name.starts_with("protect_"))
            .count();
        let cloud = catalog.tools().len() - network - protect;
        assert_eq!(cloud, 7);
        assert_eq!(network, 30);
        assert_eq!(protect, 24);
    }
}
