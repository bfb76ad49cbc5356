//! Formatters for Protect API responses.

use super::{display, field, json_detail, pointer};
use serde_json::Value;

const EVENT_DISPLAY_LIMIT: usize = 50;

pub fn format_app_info(data: &Value) -> String {
    let mut lines = vec!["## Protect Application Info\n".to_string()];
    if let Some(obj) = data.as_object() {
        for (key, value) in obj {
            lines.push(format!("- **{key}**: {}", display(value)));
        }
    }
    lines.join("\n")
}

pub fn format_nvr(data: &Value) -> String {
    // The endpoint may answer a single object or a one-element array.
    let nvr = match data {
        Value::Array(entries) => match entries.first() {
            Some(first) => first,
            None => return "No NVR info found.".to_string(),
        },
        other => other,
    };
    if !nvr.is_object() {
        return json_detail(data);
    }

    let mut lines = vec!["## NVR System Info\n".to_string()];
    lines.push(format!(
        "- **Name**: {}",
        nvr.get("name").and_then(Value::as_str).unwrap_or("Unnamed")
    ));
    lines.push(format!("- **ID**: `{}`", field(nvr, "id")));
    lines.push(format!("- **Host**: {}", field(nvr, "host")));
    lines.push(format!("- **Firmware**: {}", field(nvr, "firmwareVersion")));
    lines.push(format!("- **Version**: {}", field(nvr, "version")));
    lines.push(format!("- **Uptime**: {}", field(nvr, "uptime")));
    if nvr.get("storageInfo").is_some() {
        lines.push(format!(
            "- **Storage**: {} / {}",
            pointer(nvr, "/storageInfo/usedSize"),
            pointer(nvr, "/storageInfo/totalSize"),
        ));
    }
    lines.join("\n")
}

fn device_header(item: &Value) -> String {
    let name = item.get("name").and_then(Value::as_str).unwrap_or("Unnamed");
    let state = item.get("state").and_then(Value::as_str).unwrap_or("unknown");
    format!("- **{name}** [{state}] (ID: `{}`)", field(item, "id"))
}

fn model_line(item: &Value) -> String {
    let model = item
        .get("type")
        .or_else(|| item.get("model"))
        .map(display)
        .unwrap_or_else(|| "N/A".into());
    format!("  Model: {model}")
}

pub fn format_cameras(data: &Value) -> String {
    let cameras = super::items(data);
    if cameras.is_empty() {
        return "No cameras found.".to_string();
    }

    let mut lines = vec![format!("Found {} camera(s):\n", cameras.len())];
    for c in &cameras {
        lines.push(device_header(c));
        lines.push(model_line(c));
        lines.push(format!("  IP: {}", field(c, "host")));
        lines.push(format!("  Firmware: {}", field(c, "firmwareVersion")));
        lines.push(format!("  Connected: {}", field(c, "isConnected")));
        lines.push(format!("  Recording: {}", field(c, "isRecording")));
        lines.push(String::new());
    }

    lines.join("\n")
}

pub fn format_lights(data: &Value) -> String {
    let lights = super::items(data);
    if lights.is_empty() {
        return "No lights found.".to_string();
    }

    let mut lines = vec![format!("Found {} light(s):\n", lights.len())];
    for light in &lights {
        lines.push(device_header(light));
        lines.push(model_line(light));
        lines.push(format!(
            "  Motion detected: {}",
            field(light, "isPirMotionDetected"),
        ));
        lines.push(String::new());
    }

    lines.join("\n")
}

pub fn format_sensors(data: &Value) -> String {
    let sensors = super::items(data);
    if sensors.is_empty() {
        return "No sensors found.".to_string();
    }

    let mut lines = vec![format!("Found {} sensor(s):\n", sensors.len())];
    for s in &sensors {
        lines.push(device_header(s));
        lines.push(model_line(s));
        if s.get("stats").is_some() {
            lines.push(format!(
                "  Temp: {} | Humidity: {} | Light: {}",
                pointer(s, "/stats/temperature/value"),
                pointer(s, "/stats/humidity/value"),
                pointer(s, "/stats/light/value"),
            ));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

pub fn format_chimes(data: &Value) -> String {
    let chimes = super::items(data);
    if chimes.is_empty() {
        return "No chimes found.".to_string();
    }

    let mut lines = vec![format!("Found {} chime(s):\n", chimes.len())];
    for c in &chimes {
        lines.push(device_header(c));
        lines.push(model_line(c));
        lines.push(String::new());
    }

    lines.join("\n")
}

pub fn format_doorlocks(data: &Value) -> String {
    let locks = super::items(data);
    if locks.is_empty() {
        return "No door locks found.".to_string();
    }

    let mut lines = vec![format!("Found {} door lock(s):\n", locks.len())];
    for d in &locks {
        lines.push(device_header(d));
        lines.push(model_line(d));
        lines.push(format!("  Lock status: {}", field(d, "lockStatus")));
        lines.push(format!(
            "  Auto-lock timeout: {}s",
            field(d, "autoLockTimeoutSec"),
        ));
        lines.push(String::new());
    }

    lines.join("\n")
}

pub fn format_events(data: &Value) -> String {
    let events = super::items(data);
    if events.is_empty() {
        return "No events found.".to_string();
    }

    let mut lines = vec![format!("Found {} event(s):\n", events.len())];
    for e in events.iter().take(EVENT_DISPLAY_LIMIT) {
        lines.push(format!(
            "- [{}] **{}** (ID: `{}`)",
            field(e, "start"),
            e.get("type").and_then(Value::as_str).unwrap_or("unknown"),
            field(e, "id"),
        ));
        let camera_id = e
            .get("cameraId")
            .or_else(|| e.get("camera"))
            .map(display)
            .unwrap_or_else(|| "N/A".into());
        if camera_id != "N/A" {
            lines.push(format!("  Camera ID: `{camera_id}`"));
        }
        if let Some(score) = e.get("score") {
            lines.push(format!("  Score: {}", display(score)));
        }
        lines.push(String::new());
    }

    if events.len() > EVENT_DISPLAY_LIMIT {
        lines.push(format!(
            "\n---\nShowing {EVENT_DISPLAY_LIMIT} of {} events. The full list was truncated for readability.",
            events.len()
        ));
    }

    lines.join("\n")
}

pub fn format_liveviews(data: &Value) -> String {
    let liveviews = super::items(data);
    if liveviews.is_empty() {
        return "No liveviews found.".to_string();
    }

    let mut lines = vec![format!("Found {} liveview(s):\n", liveviews.len())];
    for lv in &liveviews {
        let name = lv.get("name").and_then(Value::as_str).unwrap_or("Unnamed");
        lines.push(format!("- **{name}** (ID: `{}`)", field(lv, "id")));
        if lv.get("isDefault").and_then(Value::as_bool).unwrap_or(false) {
            lines.push("  Default: yes".to_string());
        }
        let slots = lv
            .get("slots")
            .and_then(Value::as_array)
            .map(Vec::len)
            .unwrap_or(0);
        lines.push(format!("  Slots: {slots}"));
        lines.push(String::new());
    }

    lines.join("\n")
}

pub fn format_viewers(data: &Value) -> String {
    let viewers = super::items(data);
    if viewers.is_empty() {
        return "No viewers found.".to_string();
    }

    let mut lines = vec![format!("Found {} viewer(s):\n", viewers.len())];
    for v in &viewers {
        lines.push(device_header(v));
        lines.push(model_line(v));
        lines.push(String::new());
    }

    lines.join("\n")
}

pub fn format_detail(data: &Value) -> String {
    json_detail(data)
}

pub fn format_crud_result(data: &Value, action: &str) -> String {
    if data.get("status").and_then(Value::as_str) == Some("success") {
        return format!("{action} completed successfully.");
    }
    json_detail(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn cameras_accept_bare_array() {
        let data = json!([{
            "id": "c-1", "name": "Porch", "state": "CONNECTED", "type": "G4 Doorbell",
            "host": "10.0.0.20", "firmwareVersion": "4.74.5",
            "isConnected": true, "isRecording": true
        }]);
        let out = format_cameras(&data);
        assert!(out.starts_with("Found 1 camera(s):"));
        assert!(out.contains("**Porch** [CONNECTED] (ID: `c-1`)"));
        assert!(out.contains("Model: G4 Doorbell"));
        assert!(out.contains("Recording: true"));
    }

    #[test]
    fn nvr_summary_reads_first_array_element() {
        let data = json!([{
            "id": "nvr-1", "name": "Basement NVR", "host": "10.0.0.2",
            "firmwareVersion": "4.0.6", "version": "5.1.60", "uptime": 123456,
            "storageInfo": {"usedSize": 100, "totalSize": 2000}
        }]);
        let out = format_nvr(&data);
        assert!(out.contains("**Name**: Basement NVR"));
        assert!(out.contains("**Storage**: 100 / 2000"));
    }

    #[test]
    fn sensors_show_stats_when_present() {
        let data = json!([{
            "id": "s-1", "name": "Garage", "state": "CONNECTED", "type": "UP Sense",
            "stats": {
                "temperature": {"value": 21.5},
                "humidity": {"value": 40},
                "light": {"value": 3}
            }
        }]);
        let out = format_sensors(&data);
        assert!(out.contains("Temp: 21.5 | Humidity: 40 | Light: 3"));
    }

    #[test]
    fn events_truncate_at_fifty() {
        let events: Vec<Value> = (0..120)
            .map(|i| json!({"id": format!("e-{i}"), "type": "motion", "start": i}))
            .collect();
        let out = format_events(&Value::Array(events));
        assert!(out.starts_with("Found 120 event(s):"));
        assert!(out.contains("Showing 50 of 120 events."));
        assert!(out.contains("`e-49`"));
        assert!(!out.contains("`e-50`"));
    }

    #[test]
    fn liveviews_count_slots_and_flag_default() {
        let data = json!([{
            "id": "lv-1", "name": "All cameras", "isDefault": true,
            "slots": [{}, {}, {}]
        }]);
        let out = format_liveviews(&data);
        assert!(out.contains("Default: yes"));
        assert!(out.contains("Slots: 3"));
    }

    #[test]
    fn formatting_is_deterministic() {
        let data = json!([{"id": "c-1", "name": "Porch", "state": "CONNECTED"}]);
        assert_eq!(format_cameras(&data), format_cameras(&data));
    }
}
