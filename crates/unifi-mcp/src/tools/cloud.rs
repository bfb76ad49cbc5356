//! Site Manager API tools (cloud, always registered).

use super::{bool_arg, object_schema, opt_str_arg, str_arg, str_list_arg, u32_arg};
use crate::catalog::{ToolDef, ToolSet};
use async_trait::async_trait;
use serde_json::{json, Value};
use unifi_api::format::cloud as fmt;
use unifi_api::CloudClient;
use unifi_core::{ApiError, ApiResult};

const DEFAULT_PAGE_SIZE: u32 = 25;

pub struct CloudTools {
    client: CloudClient,
}

impl CloudTools {
    pub fn new(client: CloudClient) -> Self {
        Self { client }
    }
}

fn page_props() -> Value {
    json!({
        "page_size": {
            "type": "integer",
            "minimum": 1,
            "description": "Number of items per page (default 25)."
        },
        "next_token": {
            "type": "string",
            "description": "Pagination token from a previous response to get the next page."
        }
    })
}

#[async_trait]
impl ToolSet for CloudTools {
    fn defs(&self) -> Vec<ToolDef> {
        vec![
            ToolDef {
                name: "list_hosts",
                description: "List all UniFi hosts (consoles/gateways) associated with your \
                              account, with type, IP address, firmware, and connectivity status.",
                input_schema: object_schema(page_props(), &[]),
            },
            ToolDef {
                name: "get_host",
                description: "Get detailed information about a specific UniFi host. Use \
                              list_hosts first to find host IDs.",
                input_schema: object_schema(
                    json!({
                        "host_id": {"type": "string", "description": "The unique identifier of the host."}
                    }),
                    &["host_id"],
                ),
            },
            ToolDef {
                name: "list_sites",
                description: "List all UniFi Network sites across all hosts in your account, \
                              with device/client counts, ISP info, and permissions.",
                input_schema: object_schema(page_props(), &[]),
            },
            ToolDef {
                name: "list_devices",
                description: "List all UniFi network devices (access points, switches, gateways), \
                              optionally filtered by host.",
                input_schema: object_schema(
                    json!({
                        "host_ids": {
                            "type": "array",
                            "items": {"type": "string"},
                            "description": "Optional list of host IDs to filter by."
                        },
                        "time": {
                            "type": "string",
                            "description": "Optional ISO 8601 timestamp to filter by last update time."
                        },
                        "page_size": {
                            "type": "integer",
                            "minimum": 1,
                            "description": "Number of items per page (default 25)."
                        },
                        "next_token": {
                            "type": "string",
                            "description": "Pagination token from a previous response."
                        }
                    }),
                    &[],
                ),
            },
            ToolDef {
                name: "get_isp_metrics",
                description: "Get ISP performance metrics (latency, throughput, uptime, packet \
                              loss) across all sites. 5-minute metrics cover 24h, hourly metrics \
                              30 days.",
                input_schema: object_schema(
                    json!({
                        "metric_type": {
                            "type": "string",
                            "enum": ["5m", "1h"],
                            "description": "Interval granularity."
                        },
                        "duration": {
                            "type": "string",
                            "description": "Lookback duration (\"24h\", \"7d\", \"30d\"). Cannot be combined with timestamps."
                        },
                        "begin_timestamp": {"type": "string", "description": "Start time, ISO 8601."},
                        "end_timestamp": {"type": "string", "description": "End time, ISO 8601."}
                    }),
                    &["metric_type"],
                ),
            },
            ToolDef {
                name: "query_isp_metrics",
                description: "Query ISP metrics for specific sites. Use list_sites first to get \
                              host and site IDs.",
                input_schema: object_schema(
                    json!({
                        "metric_type": {
                            "type": "string",
                            "enum": ["5m", "1h"],
                            "description": "Interval granularity."
                        },
                        "sites": {
                            "type": "array",
                            "items": {"type": "object"},
                            "description": "Site selectors, each with hostId and siteId, optionally beginTimestamp/endTimestamp."
                        }
                    }),
                    &["metric_type", "sites"],
                ),
            },
            ToolDef {
                name: "get_sdwan_config",
                description: "Get SD-WAN configurations. Without config_id lists all configs; \
                              with config_id returns details, optionally with deployment status.",
                input_schema: object_schema(
                    json!({
                        "config_id": {"type": "string", "description": "SD-WAN config ID. Omit to list all configs."},
                        "include_status": {"type": "boolean", "description": "Also fetch deployment status (requires config_id)."}
                    }),
                    &[],
                ),
            },
        ]
    }

    async fn call(&self, name: &str, args: &Value) -> ApiResult<String> {
        match name {
            "list_hosts" => {
                let data = self
                    .client
                    .list_hosts(
                        u32_arg(args, "page_size", DEFAULT_PAGE_SIZE),
                        opt_str_arg(args, "next_token"),
                    )
                    .await?;
                Ok(fmt::format_hosts(&data))
            }
            "get_host" => {
                let data = self.client.get_host(str_arg(args, "host_id")).await?;
                Ok(fmt::format_host_detail(&data))
            }
            "list_sites" => {
                let data = self
                    .client
                    .list_sites(
                        u32_arg(args, "page_size", DEFAULT_PAGE_SIZE),
                        opt_str_arg(args, "next_token"),
                    )
                    .await?;
                Ok(fmt::format_sites(&data))
            }
            "list_devices" => {
                let data = self
                    .client
                    .list_devices(
                        &str_list_arg(args, "host_ids"),
                        opt_str_arg(args, "time"),
                        u32_arg(args, "page_size", DEFAULT_PAGE_SIZE),
                        opt_str_arg(args, "next_token"),
                    )
                    .await?;
                Ok(fmt::format_devices(&data))
            }
            "get_isp_metrics" => {
                let data = self
                    .client
                    .get_isp_metrics(
                        str_arg(args, "metric_type"),
                        opt_str_arg(args, "duration"),
                        opt_str_arg(args, "begin_timestamp"),
                        opt_str_arg(args, "end_timestamp"),
                    )
                    .await?;
                Ok(fmt::format_isp_metrics(&data))
            }
            "query_isp_metrics" => {
                let sites = args.get("sites").cloned().unwrap_or_else(|| json!([]));
                let data = self
                    .client
                    .query_isp_metrics(str_arg(args, "metric_type"), &sites)
                    .await?;
                Ok(fmt::format_isp_metrics(&data))
            }
            "get_sdwan_config" => match opt_str_arg(args, "config_id") {
                None => {
                    let data = self.client.list_sdwan_configs().await?;
                    Ok(fmt::format_sdwan_configs(&data))
                }
                Some(config_id) => {
                    let mut parts = vec!["## Configuration\n".to_string()];
                    let data = self.client.get_sdwan_config(config_id).await?;
                    parts.push(fmt::format_sdwan_config_detail(&data));

                    if bool_arg(args, "include_status") {
                        let status = self.client.get_sdwan_config_status(config_id).await?;
                        parts.push("\n\n## Deployment Status\n".to_string());
                        parts.push(fmt::format_sdwan_config_status(&status));
                    }

                    Ok(parts.join("\n"))
                }
            },
            other => Err(ApiError::Config(format!(
                "tool {other} is not part of the Site Manager tool set"
            ))),
        }
    }
}
