//! Protect API tools (local console, registered when a host is configured).

use super::{object_schema, str_arg, value_arg};
use crate::catalog::{ToolDef, ToolSet};
use async_trait::async_trait;
use serde_json::{json, Map, Value};
use unifi_api::format::protect as fmt;
use unifi_api::ProtectClient;
use unifi_core::{ApiError, ApiResult};

pub struct ProtectTools {
    client: ProtectClient,
}

impl ProtectTools {
    pub fn new(client: ProtectClient) -> Self {
        Self { client }
    }
}

fn id_schema(name: &str, description: &str) -> Value {
    let mut props = Map::new();
    props.insert(
        name.to_string(),
        json!({"type": "string", "description": description}),
    );
    object_schema(Value::Object(props), &[name])
}

fn update_schema(name: &str, id_description: &str, body_description: &str) -> Value {
    let mut props = Map::new();
    props.insert(
        name.to_string(),
        json!({"type": "string", "description": id_description}),
    );
    props.insert(
        "data".to_string(),
        json!({"type": "object", "description": body_description}),
    );
    object_schema(Value::Object(props), &[name, "data"])
}

#[async_trait]
impl ToolSet for ProtectTools {
    fn defs(&self) -> Vec<ToolDef> {
        vec![
            ToolDef {
                name: "protect_info",
                description: "Get UniFi Protect application info and NVR system summary \
                              (firmware, storage). Use this first to check the Protect console.",
                input_schema: object_schema(json!({}), &[]),
            },
            // --- Cameras ---
            ToolDef {
                name: "protect_list_cameras",
                description: "List all cameras managed by the Protect console, with connection \
                              and recording state.",
                input_schema: object_schema(json!({}), &[]),
            },
            ToolDef {
                name: "protect_get_camera",
                description: "Get detailed information about a specific camera.",
                input_schema: id_schema("camera_id", "The camera ID."),
            },
            ToolDef {
                name: "protect_update_camera",
                description: "Update camera settings (name, recording mode, etc.).",
                input_schema: update_schema(
                    "camera_id",
                    "The camera ID to update.",
                    "Updated camera settings.",
                ),
            },
            // --- Lights ---
            ToolDef {
                name: "protect_list_lights",
                description: "List all Protect lights with motion state.",
                input_schema: object_schema(json!({}), &[]),
            },
            ToolDef {
                name: "protect_get_light",
                description: "Get detailed information about a specific light.",
                input_schema: id_schema("light_id", "The light ID."),
            },
            ToolDef {
                name: "protect_update_light",
                description: "Update light settings (name, light mode, etc.).",
                input_schema: update_schema(
                    "light_id",
                    "The light ID to update.",
                    "Updated light settings.",
                ),
            },
            // --- Sensors ---
            ToolDef {
                name: "protect_list_sensors",
                description: "List all Protect sensors with temperature, humidity, and light \
                              readings.",
                input_schema: object_schema(json!({}), &[]),
            },
            ToolDef {
                name: "protect_get_sensor",
                description: "Get detailed information about a specific sensor.",
                input_schema: id_schema("sensor_id", "The sensor ID."),
            },
            ToolDef {
                name: "protect_update_sensor",
                description: "Update sensor settings (name, sensitivity, etc.).",
                input_schema: update_schema(
                    "sensor_id",
                    "The sensor ID to update.",
                    "Updated sensor settings.",
                ),
            },
            // --- Chimes ---
            ToolDef {
                name: "protect_list_chimes",
                description: "List all Protect chimes.",
                input_schema: object_schema(json!({}), &[]),
            },
            ToolDef {
                name: "protect_get_chime",
                description: "Get detailed information about a specific chime.",
                input_schema: id_schema("chime_id", "The chime ID."),
            },
            ToolDef {
                name: "protect_update_chime",
                description: "Update chime settings (name, volume, etc.).",
                input_schema: update_schema(
                    "chime_id",
                    "The chime ID to update.",
                    "Updated chime settings.",
                ),
            },
            // --- Door locks ---
            ToolDef {
                name: "protect_list_doorlocks",
                description: "List all Protect door locks with lock status.",
                input_schema: object_schema(json!({}), &[]),
            },
            ToolDef {
                name: "protect_get_doorlock",
                description: "Get detailed information about a specific door lock.",
                input_schema: id_schema("doorlock_id", "The door lock ID."),
            },
            ToolDef {
                name: "protect_update_doorlock",
                description: "Update door lock settings (name, auto-lock timeout, etc.).",
                input_schema: update_schema(
                    "doorlock_id",
                    "The door lock ID to update.",
                    "Updated door lock settings.",
                ),
            },
            // --- Events ---
            ToolDef {
                name: "protect_list_events",
                description: "List recent Protect events (motion, smart detections). Shows the \
                              50 most recent of up to 10K returned events.",
                input_schema: object_schema(json!({}), &[]),
            },
            // --- Liveviews ---
            ToolDef {
                name: "protect_list_liveviews",
                description: "List all configured liveviews.",
                input_schema: object_schema(json!({}), &[]),
            },
            ToolDef {
                name: "protect_get_liveview",
                description: "Get detailed information about a specific liveview.",
                input_schema: id_schema("liveview_id", "The liveview ID."),
            },
            ToolDef {
                name: "protect_create_liveview",
                description: "Create a new liveview.",
                input_schema: object_schema(
                    json!({
                        "data": {"type": "object", "description": "Liveview configuration (name, layout, slots)."}
                    }),
                    &["data"],
                ),
            },
            ToolDef {
                name: "protect_update_liveview",
                description: "Update an existing liveview.",
                input_schema: update_schema(
                    "liveview_id",
                    "The liveview ID to update.",
                    "Updated liveview configuration.",
                ),
            },
            // --- Viewers ---
            ToolDef {
                name: "protect_list_viewers",
                description: "List all Protect viewport devices.",
                input_schema: object_schema(json!({}), &[]),
            },
            ToolDef {
                name: "protect_get_viewer",
                description: "Get detailed information about a specific viewer.",
                input_schema: id_schema("viewer_id", "The viewer ID."),
            },
            ToolDef {
                name: "protect_update_viewer",
                description: "Update viewer settings (name, assigned liveview).",
                input_schema: update_schema(
                    "viewer_id",
                    "The viewer ID to update.",
                    "Updated viewer settings.",
                ),
            },
        ]
    }

    async fn call(&self, name: &str, args: &Value) -> ApiResult<String> {
        match name {
            "protect_info" => {
                let info = self.client.get_app_info().await?;
                let nvr = self.client.get_nvr().await?;
                Ok([fmt::format_app_info(&info), String::new(), fmt::format_nvr(&nvr)].join("\n"))
            }
            "protect_list_cameras" => {
                let data = self.client.list_cameras().await?;
                Ok(fmt::format_cameras(&data))
            }
            "protect_get_camera" => {
                let data = self.client.get_camera(str_arg(args, "camera_id")).await?;
                Ok(fmt::format_detail(&data))
            }
            "protect_update_camera" => {
                let data = self
                    .client
                    .update_camera(str_arg(args, "camera_id"), &value_arg(args, "data"))
                    .await?;
                Ok(fmt::format_crud_result(&data, "Camera updated"))
            }
            "protect_list_lights" => {
                let data = self.client.list_lights().await?;
                Ok(fmt::format_lights(&data))
            }
            "protect_get_light" => {
                let data = self.client.get_light(str_arg(args, "light_id")).await?;
                Ok(fmt::format_detail(&data))
            }
            "protect_update_light" => {
                let data = self
                    .client
                    .update_light(str_arg(args, "light_id"), &value_arg(args, "data"))
                    .await?;
                Ok(fmt::format_crud_result(&data, "Light updated"))
            }
            "protect_list_sensors" => {
                let data = self.client.list_sensors().await?;
                Ok(fmt::format_sensors(&data))
            }
            "protect_get_sensor" => {
                let data = self.client.get_sensor(str_arg(args, "sensor_id")).await?;
                Ok(fmt::format_detail(&data))
            }
            "protect_update_sensor" => {
                let data = self
                    .client
                    .update_sensor(str_arg(args, "sensor_id"), &value_arg(args, "data"))
                    .await?;
                Ok(fmt::format_crud_result(&data, "Sensor updated"))
            }
            "protect_list_chimes" => {
                let data = self.client.list_chimes().await?;
                Ok(fmt::format_chimes(&data))
            }
            "protect_get_chime" => {
                let data = self.client.get_chime(str_arg(args, "chime_id")).await?;
                Ok(fmt::format_detail(&data))
            }
            "protect_update_chime" => {
                let data = self
                    .client
                    .update_chime(str_arg(args, "chime_id"), &value_arg(args, "data"))
                    .await?;
                Ok(fmt::format_crud_result(&data, "Chime updated"))
            }
            "protect_list_doorlocks" => {
                let data = self.client.list_doorlocks().await?;
                Ok(fmt::format_doorlocks(&data))
            }
            "protect_get_doorlock" => {
                let data = self.client.get_doorlock(str_arg(args, "doorlock_id")).await?;
                Ok(fmt::format_detail(&data))
            }
            "protect_update_doorlock" => {
                let data = self
                    .client
                    .update_doorlock(str_arg(args, "doorlock_id"), &value_arg(args, "data"))
                    .await?;
                Ok(fmt::format_crud_result(&data, "Door lock updated"))
            }
            "protect_list_events" => {
                let data = self.client.list_events().await?;
                Ok(fmt::format_events(&data))
            }
            "protect_list_liveviews" => {
                let data = self.client.list_liveviews().await?;
                Ok(fmt::format_liveviews(&data))
            }
            "protect_get_liveview" => {
                let data = self.client.get_liveview(str_arg(args, "liveview_id")).await?;
                Ok(fmt::format_detail(&data))
            }
            "protect_create_liveview" => {
                let data = self.client.create_liveview(&value_arg(args, "data")).await?;
                Ok(fmt::format_crud_result(&data, "Liveview created"))
            }
            "protect_update_liveview" => {
                let data = self
                    .client
                    .update_liveview(str_arg(args, "liveview_id"), &value_arg(args, "data"))
                    .await?;
                Ok(fmt::format_crud_result(&data, "Liveview updated"))
            }
            "protect_list_viewers" => {
                let data = self.client.list_viewers().await?;
                Ok(fmt::format_viewers(&data))
            }
            "protect_get_viewer" => {
                let data = self.client.get_viewer(str_arg(args, "viewer_id")).await?;
                Ok(fmt::format_detail(&data))
            }
            "protect_update_viewer" => {
                let data = self
                    .client
                    .update_viewer(str_arg(args, "viewer_id"), &value_arg(args, "data"))
                    .await?;
                Ok(fmt::format_crud_result(&data, "Viewer updated"))
            }
            other => Err(ApiError::Config(format!(
                "tool {other} is not part of the Protect tool set"
            ))),
        }
    }
}
