//! Network API tools (local console, registered when a host is configured).

use super::{object_schema, str_arg, u32_arg, value_arg};
use crate::catalog::{ToolDef, ToolSet};
use async_trait::async_trait;
use serde_json::{json, Map, Value};
use unifi_api::format::network as fmt;
use unifi_api::NetworkClient;
use unifi_core::{ApiError, ApiResult};

const DEFAULT_LIMIT: u32 = 25;

pub struct NetworkTools {
    client: NetworkClient,
}

impl NetworkTools {
    pub fn new(client: NetworkClient) -> Self {
        Self { client }
    }
}

fn site_id_prop() -> (String, Value) {
    (
        "site_id".to_string(),
        json!({"type": "string", "description": "The site ID (get from network_info)."}),
    )
}

fn paged_props() -> Value {
    let mut props = Map::new();
    let (key, value) = site_id_prop();
    props.insert(key, value);
    props.insert(
        "offset".to_string(),
        json!({"type": "integer", "minimum": 0, "description": "Pagination offset (default 0)."}),
    );
    props.insert(
        "limit".to_string(),
        json!({"type": "integer", "minimum": 1, "maximum": 200, "description": "Items per page (default 25, max 200)."}),
    );
    Value::Object(props)
}

/// Schema with site_id plus the given extra properties.
fn site_schema(extra: &[(&str, Value)], required: &[&str]) -> Value {
    let mut props = Map::new();
    let (key, value) = site_id_prop();
    props.insert(key, value);
    for (name, spec) in extra {
        props.insert(name.to_string(), spec.clone());
    }
    object_schema(Value::Object(props), required)
}

fn id_prop(name: &'static str, description: &str) -> (&'static str, Value) {
    (name, json!({"type": "string", "description": description}))
}

fn body_prop(description: &str) -> (&'static str, Value) {
    ("data", json!({"type": "object", "description": description}))
}

#[async_trait]
impl ToolSet for NetworkTools {
    fn defs(&self) -> Vec<ToolDef> {
        vec![
            ToolDef {
                name: "network_info",
                description: "Get UniFi Network application info and list all local sites. Use \
                              this first to discover site IDs needed by other network_* tools.",
                input_schema: object_schema(json!({}), &[]),
            },
            // --- Devices ---
            ToolDef {
                name: "network_list_devices",
                description: "List all adopted devices on a local UniFi site.",
                input_schema: object_schema(paged_props(), &["site_id"]),
            },
            ToolDef {
                name: "network_get_device",
                description: "Get detailed information about a specific device, optionally with \
                              its latest statistics.",
                input_schema: site_schema(
                    &[
                        id_prop("device_id", "The device ID."),
                        (
                            "include_statistics",
                            json!({"type": "boolean", "description": "Also fetch latest device statistics."}),
                        ),
                    ],
                    &["site_id", "device_id"],
                ),
            },
            ToolDef {
                name: "network_device_action",
                description: "Execute an action on a UniFi device (restart, locate, adopt).",
                input_schema: site_schema(
                    &[
                        id_prop("device_id", "The device ID."),
                        (
                            "action",
                            json!({"type": "string", "description": "The action to execute (e.g. \"restart\", \"locate\", \"adopt\")."}),
                        ),
                    ],
                    &["site_id", "device_id", "action"],
                ),
            },
            // --- Clients ---
            ToolDef {
                name: "network_list_clients",
                description: "List all connected clients on a local UniFi site.",
                input_schema: object_schema(paged_props(), &["site_id"]),
            },
            ToolDef {
                name: "network_get_client",
                description: "Get detailed information about a specific connected client.",
                input_schema: site_schema(
                    &[id_prop("client_id", "The client ID.")],
                    &["site_id", "client_id"],
                ),
            },
            ToolDef {
                name: "network_client_action",
                description: "Execute an action on a connected client (block, reconnect).",
                input_schema: site_schema(
                    &[
                        id_prop("client_id", "The client ID."),
                        (
                            "action",
                            json!({"type": "string", "description": "The action to execute (e.g. \"block\", \"reconnect\")."}),
                        ),
                    ],
                    &["site_id", "client_id", "action"],
                ),
            },
            // --- Networks ---
            ToolDef {
                name: "network_list_networks",
                description: "List all configured networks (VLANs) on a local UniFi site.",
                input_schema: object_schema(paged_props(), &["site_id"]),
            },
            ToolDef {
                name: "network_get_network",
                description: "Get detailed information about a specific network.",
                input_schema: site_schema(
                    &[id_prop("network_id", "The network ID.")],
                    &["site_id", "network_id"],
                ),
            },
            ToolDef {
                name: "network_create_network",
                description: "Create a new network on a local UniFi site.",
                input_schema: site_schema(
                    &[body_prop("Network configuration (name, vlanId, etc.).")],
                    &["site_id", "data"],
                ),
            },
            ToolDef {
                name: "network_update_network",
                description: "Update an existing network on a local UniFi site.",
                input_schema: site_schema(
                    &[
                        id_prop("network_id", "The network ID to update."),
                        body_prop("Updated network configuration."),
                    ],
                    &["site_id", "network_id", "data"],
                ),
            },
            ToolDef {
                name: "network_delete_network",
                description: "Delete a network from a local UniFi site.",
                input_schema: site_schema(
                    &[id_prop("network_id", "The network ID to delete.")],
                    &["site_id", "network_id"],
                ),
            },
            // --- WiFi ---
            ToolDef {
                name: "network_list_wifi",
                description: "List all WiFi broadcasts (SSIDs) on a local UniFi site.",
                input_schema: object_schema(paged_props(), &["site_id"]),
            },
            ToolDef {
                name: "network_get_wifi",
                description: "Get detailed information about a specific WiFi broadcast (SSID).",
                input_schema: site_schema(
                    &[id_prop("wifi_id", "The WiFi broadcast ID.")],
                    &["site_id", "wifi_id"],
                ),
            },
            ToolDef {
                name: "network_create_wifi",
                description: "Create a new WiFi broadcast (SSID) on a local UniFi site.",
                input_schema: site_schema(
                    &[body_prop("WiFi configuration (name, security, etc.).")],
                    &["site_id", "data"],
                ),
            },
            ToolDef {
                name: "network_update_wifi",
                description: "Update an existing WiFi broadcast (SSID) on a local UniFi site.",
                input_schema: site_schema(
                    &[
                        id_prop("wifi_id", "The WiFi broadcast ID to update."),
                        body_prop("Updated WiFi configuration."),
                    ],
                    &["site_id", "wifi_id", "data"],
                ),
            },
            ToolDef {
                name: "network_delete_wifi",
                description: "Delete a WiFi broadcast (SSID) from a local UniFi site.",
                input_schema: site_schema(
                    &[id_prop("wifi_id", "The WiFi broadcast ID to delete.")],
                    &["site_id", "wifi_id"],
                ),
            },
            // --- Firewall ---
            ToolDef {
                name: "network_list_firewall_zones",
                description: "List firewall zones on a local UniFi site.",
                input_schema: object_schema(paged_props(), &["site_id"]),
            },
            ToolDef {
                name: "network_list_firewall_policies",
                description: "List firewall policies on a local UniFi site.",
                input_schema: object_schema(paged_props(), &["site_id"]),
            },
            ToolDef {
                name: "network_create_firewall_policy",
                description: "Create a new firewall policy on a local UniFi site.",
                input_schema: site_schema(
                    &[body_prop("Firewall policy configuration.")],
                    &["site_id", "data"],
                ),
            },
            ToolDef {
                name: "network_update_firewall_policy",
                description: "Update an existing firewall policy on a local UniFi site.",
                input_schema: site_schema(
                    &[
                        id_prop("policy_id", "The firewall policy ID to update."),
                        body_prop("Updated firewall policy configuration."),
                    ],
                    &["site_id", "policy_id", "data"],
                ),
            },
            ToolDef {
                name: "network_delete_firewall_policy",
                description: "Delete a firewall policy from a local UniFi site.",
                input_schema: site_schema(
                    &[id_prop("policy_id", "The firewall policy ID to delete.")],
                    &["site_id", "policy_id"],
                ),
            },
            // --- DNS ---
            ToolDef {
                name: "network_list_dns_policies",
                description: "List DNS filtering policies on a local UniFi site.",
                input_schema: object_schema(paged_props(), &["site_id"]),
            },
            // --- Vouchers ---
            ToolDef {
                name: "network_list_vouchers",
                description: "List hotspot vouchers on a local UniFi site.",
                input_schema: object_schema(paged_props(), &["site_id"]),
            },
            ToolDef {
                name: "network_create_vouchers",
                description: "Create hotspot vouchers on a local UniFi site.",
                input_schema: site_schema(
                    &[body_prop("Voucher configuration (duration, quota, count, etc.).")],
                    &["site_id", "data"],
                ),
            },
            ToolDef {
                name: "network_delete_voucher",
                description: "Delete a hotspot voucher from a local UniFi site.",
                input_schema: site_schema(
                    &[id_prop("voucher_id", "The voucher ID to delete.")],
                    &["site_id", "voucher_id"],
                ),
            },
            // --- Supporting resources ---
            ToolDef {
                name: "network_list_wans",
                description: "List WAN interfaces on a local UniFi site.",
                input_schema: object_schema(paged_props(), &["site_id"]),
            },
            ToolDef {
                name: "network_list_vpn_tunnels",
                description: "List site-to-site VPN tunnels on a local UniFi site.",
                input_schema: object_schema(paged_props(), &["site_id"]),
            },
            ToolDef {
                name: "network_list_vpn_servers",
                description: "List VPN servers on a local UniFi site.",
                input_schema: object_schema(paged_props(), &["site_id"]),
            },
            ToolDef {
                name: "network_list_radius_profiles",
                description: "List RADIUS profiles on a local UniFi site.",
                input_schema: object_schema(paged_props(), &["site_id"]),
            },
        ]
    }

    async fn call(&self, name: &str, args: &Value) -> ApiResult<String> {
        let site_id = str_arg(args, "site_id");
        let offset = u32_arg(args, "offset", 0);
        let limit = u32_arg(args, "limit", DEFAULT_LIMIT);

        match name {
            "network_info" => {
                let info = self.client.get_info().await?;
                let sites = self.client.list_sites(0, DEFAULT_LIMIT).await?;
                Ok([
                    fmt::format_info(&info),
                    String::new(),
                    fmt::format_sites(&sites),
                ]
                .join("\n"))
            }
            "network_list_devices" => {
                let data = self.client.list_devices(site_id, offset, limit).await?;
                Ok(fmt::format_devices(&data))
            }
            "network_get_device" => {
                let device_id = str_arg(args, "device_id");
                let data = self.client.get_device(site_id, device_id).await?;
                let mut parts = vec![fmt::format_device_detail(&data)];
                if super::bool_arg(args, "include_statistics") {
                    let stats = self.client.get_device_statistics(site_id, device_id).await?;
                    parts.push("\n\n## Latest Statistics\n".to_string());
                    parts.push(fmt::format_device_statistics(&stats));
                }
                Ok(parts.join("\n"))
            }
            "network_device_action" => {
                let action = json!({"action": str_arg(args, "action")});
                let data = self
                    .client
                    .execute_device_action(site_id, str_arg(args, "device_id"), &action)
                    .await?;
                Ok(fmt::format_action_result(&data))
            }
            "network_list_clients" => {
                let data = self.client.list_clients(site_id, offset, limit).await?;
                Ok(fmt::format_clients(&data))
            }
            "network_get_client" => {
                let data = self
                    .client
                    .get_client(site_id, str_arg(args, "client_id"))
                    .await?;
                Ok(fmt::format_client_detail(&data))
            }
            "network_client_action" => {
                let action = json!({"action": str_arg(args, "action")});
                let data = self
                    .client
                    .execute_client_action(site_id, str_arg(args, "client_id"), &action)
                    .await?;
                Ok(fmt::format_action_result(&data))
            }
            "network_list_networks" => {
                let data = self.client.list_networks(site_id, offset, limit).await?;
                Ok(fmt::format_networks(&data))
            }
            "network_get_network" => {
                let data = self
                    .client
                    .get_network(site_id, str_arg(args, "network_id"))
                    .await?;
                Ok(fmt::format_network_detail(&data))
            }
            "network_create_network" => {
                let data = self
                    .client
                    .create_network(site_id, &value_arg(args, "data"))
                    .await?;
                Ok(fmt::format_crud_result(&data, "Network created"))
            }
            "network_update_network" => {
                let data = self
                    .client
                    .update_network(site_id, str_arg(args, "network_id"), &value_arg(args, "data"))
                    .await?;
                Ok(fmt::format_crud_result(&data, "Network updated"))
            }
            "network_delete_network" => {
                let data = self
                    .client
                    .delete_network(site_id, str_arg(args, "network_id"))
                    .await?;
                Ok(fmt::format_crud_result(&data, "Network deleted"))
            }
            "network_list_wifi" => {
                let data = self.client.list_wifi(site_id, offset, limit).await?;
                Ok(fmt::format_wifi(&data))
            }
            "network_get_wifi" => {
                let data = self.client.get_wifi(site_id, str_arg(args, "wifi_id")).await?;
                Ok(fmt::format_wifi_detail(&data))
            }
            "network_create_wifi" => {
                let data = self
                    .client
                    .create_wifi(site_id, &value_arg(args, "data"))
                    .await?;
                Ok(fmt::format_crud_result(&data, "WiFi broadcast created"))
            }
            "network_update_wifi" => {
                let data = self
                    .client
                    .update_wifi(site_id, str_arg(args, "wifi_id"), &value_arg(args, "data"))
                    .await?;
                Ok(fmt::format_crud_result(&data, "WiFi broadcast updated"))
            }
            "network_delete_wifi" => {
                let data = self
                    .client
                    .delete_wifi(site_id, str_arg(args, "wifi_id"))
                    .await?;
                Ok(fmt::format_crud_result(&data, "WiFi broadcast deleted"))
            }
            "network_list_firewall_zones" => {
                let data = self
                    .client
                    .list_firewall_zones(site_id, offset, limit)
                    .await?;
                Ok(fmt::format_firewall_zones(&data))
            }
            "network_list_firewall_policies" => {
                let data = self
                    .client
                    .list_firewall_policies(site_id, offset, limit)
                    .await?;
                Ok(fmt::format_firewall_policies(&data))
            }
            "network_create_firewall_policy" => {
                let data = self
                    .client
                    .create_firewall_policy(site_id, &value_arg(args, "data"))
                    .await?;
                Ok(fmt::format_crud_result(&data, "Firewall policy created"))
            }
            "network_update_firewall_policy" => {
                let data = self
                    .client
                    .update_firewall_policy(
                        site_id,
                        str_arg(args, "policy_id"),
                        &value_arg(args, "data"),
                    )
                    .await?;
                Ok(fmt::format_crud_result(&data, "Firewall policy updated"))
            }
            "network_delete_firewall_policy" => {
                let data = self
                    .client
                    .delete_firewall_policy(site_id, str_arg(args, "policy_id"))
                    .await?;
                Ok(fmt::format_crud_result(&data, "Firewall policy deleted"))
            }
            "network_list_dns_policies" => {
                let data = self.client.list_dns_policies(site_id, offset, limit).await?;
                Ok(fmt::format_dns_policies(&data))
            }
            "network_list_vouchers" => {
                let data = self.client.list_vouchers(site_id, offset, limit).await?;
                Ok(fmt::format_vouchers(&data))
            }
            "network_create_vouchers" => {
                let data = self
                    .client
                    .create_vouchers(site_id, &value_arg(args, "data"))
                    .await?;
                Ok(fmt::format_crud_result(&data, "Vouchers created"))
            }
            "network_delete_voucher" => {
                let data = self
                    .client
                    .delete_voucher(site_id, str_arg(args, "voucher_id"))
                    .await?;
                Ok(fmt::format_crud_result(&data, "Voucher deleted"))
            }
            "network_list_wans" => {
                let data = self.client.list_wans(site_id, offset, limit).await?;
                Ok(fmt::format_wans(&data))
            }
            "network_list_vpn_tunnels" => {
                let data = self.client.list_vpn_tunnels(site_id, offset, limit).await?;
                Ok(fmt::format_vpn_tunnels(&data))
            }
            "network_list_vpn_servers" => {
                let data = self.client.list_vpn_servers(site_id, offset, limit).await?;
                Ok(fmt::format_vpn_servers(&data))
            }
            "network_list_radius_profiles" => {
                let data = self
                    .client
                    .list_radius_profiles(site_id, offset, limit)
                    .await?;
                Ok(fmt::format_radius_profiles(&data))
            }
            other => Err(ApiError::Config(format!(
                "tool {other} is not part of the Network tool set"
            ))),
        }
    }
}
