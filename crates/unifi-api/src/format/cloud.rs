//! Formatters for Site Manager API responses.

use super::{display, field, json_detail, pointer};
use serde_json::Value;

fn pagination_hint(data: &Value) -> String {
    match data.get("nextToken").and_then(Value::as_str) {
        Some(token) if !token.is_empty() => format!(
            "\n---\nMore results available. Use next_token=\"{token}\" to get the next page."
        ),
        _ => String::new(),
    }
}

pub fn format_hosts(data: &Value) -> String {
    let hosts = super::items(data);
    if hosts.is_empty() {
        return "No hosts found.".to_string();
    }

    let mut lines = vec![format!("Found {} host(s):\n", hosts.len())];
    for h in &hosts {
        let reported = h.get("reportedState").unwrap_or(&Value::Null);
        let name = reported
            .get("hostname")
            .or_else(|| reported.get("name"))
            .and_then(Value::as_str)
            .unwrap_or("Unknown");
        lines.push(format!("- **{name}** (ID: `{}`)", field(h, "id")));
        lines.push(format!("  Type: {}", field(h, "type")));
        lines.push(format!("  IP: {}", field(h, "ipAddress")));
        lines.push(format!("  Owner: {}", field(h, "owner")));
        if let Some(fw) = reported
            .get("firmwareVersion")
            .or_else(|| reported.get("version"))
        {
            lines.push(format!("  Firmware: {}", display(fw)));
        }
        if let Some(hw) = reported
            .get("hardwareId")
            .or_else(|| reported.pointer("/hardware/shortname"))
        {
            lines.push(format!("  Hardware: {}", display(hw)));
        }
        if let Some(change) = h.get("lastConnectionStateChange") {
            lines.push(format!("  Last connection change: {}", display(change)));
        }
        lines.push(String::new());
    }

    lines.push(pagination_hint(data));
    lines.join("\n")
}

pub fn format_host_detail(data: &Value) -> String {
    json_detail(data.get("data").unwrap_or(data))
}

pub fn format_sites(data: &Value) -> String {
    let sites = super::items(data);
    if sites.is_empty() {
        return "No sites found.".to_string();
    }

    let mut lines = vec![format!("Found {} site(s):\n", sites.len())];
    for s in &sites {
        let name = s
            .pointer("/meta/name")
            .and_then(Value::as_str)
            .unwrap_or("Unnamed");
        lines.push(format!("- **{name}** (Site ID: `{}`)", field(s, "siteId")));
        if let Some(desc) = s.pointer("/meta/desc").and_then(Value::as_str) {
            if !desc.is_empty() {
                lines.push(format!("  Description: {desc}"));
            }
        }
        lines.push(format!("  Host ID: `{}`", field(s, "hostId")));
        lines.push(format!("  Timezone: {}", pointer(s, "/meta/timezone")));
        lines.push(format!(
            "  Devices: {} | Clients: {}",
            pointer(s, "/statistics/counts/totalDevice"),
            pointer(s, "/statistics/counts/totalClient"),
        ));
        lines.push(format!(
            "  Permission: {} | Owner: {}",
            field(s, "permission"),
            field(s, "isOwner"),
        ));
        if s.pointer("/statistics/isp").is_some() {
            lines.push(format!(
                "  ISP: {} (ASN: {})",
                pointer(s, "/statistics/isp/name"),
                pointer(s, "/statistics/isp/asn"),
            ));
        }
        lines.push(String::new());
    }

    lines.push(pagination_hint(data));
    lines.join("\n")
}

pub fn format_devices(data: &Value) -> String {
    let host_groups = super::items(data);
    if host_groups.is_empty() {
        return "No devices found.".to_string();
    }

    let mut lines: Vec<String> = Vec::new();
    let mut total_devices = 0;

    for group in &host_groups {
        let host_name = group
            .get("hostName")
            .and_then(Value::as_str)
            .unwrap_or("Unknown Host");
        let devices = group
            .get("devices")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        total_devices += devices.len();

        lines.push(format!("### {host_name} (`{}`)", field(group, "hostId")));
        if devices.is_empty() {
            lines.push("  No devices.\n".to_string());
            continue;
        }

        for d in devices {
            let name = d.get("name").and_then(Value::as_str).unwrap_or("Unnamed");
            let status = d.get("status").and_then(Value::as_str).unwrap_or("unknown");
            lines.push(format!("- **{name}** [{status}]"));
            let model = d
                .get("shortname")
                .or_else(|| d.get("model"))
                .map(display)
                .unwrap_or_else(|| "N/A".into());
            lines.push(format!(
                "  Model: {model} | Product: {}",
                field(d, "productLine")
            ));
            lines.push(format!("  IP: {} | MAC: {}", field(d, "ip"), field(d, "mac")));
            lines.push(format!(
                "  Firmware: {} (update: {})",
                field(d, "version"),
                field(d, "firmwareStatus"),
            ));
            if let Some(startup) = d.get("startupTime") {
                lines.push(format!("  Uptime since: {}", display(startup)));
            }
            lines.push(String::new());
        }
    }

    lines.insert(
        0,
        format!(
            "Found {total_devices} device(s) across {} host(s):\n",
            host_groups.len()
        ),
    );
    lines.push(pagination_hint(data));
    lines.join("\n")
}

pub fn format_isp_metrics(data: &Value) -> String {
    let metrics_list = super::items(data);
    if metrics_list.is_empty() {
        return "No ISP metrics found.".to_string();
    }

    let mut lines: Vec<String> = Vec::new();
    for entry in &metrics_list {
        lines.push(format!(
            "### Site `{}` (Host: `{}`) - {} intervals",
            field(entry, "siteId"),
            field(entry, "hostId"),
            field(entry, "metricType"),
        ));
        let periods = entry
            .get("periods")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        if periods.is_empty() {
            lines.push("  No data points.\n".to_string());
            continue;
        }

        lines.push(format!("  Data points: {}", periods.len()));
        for p in periods {
            let wan = p.pointer("/data/wan").unwrap_or(&Value::Null);
            lines.push(format!("  [{}]", field(p, "metricTime")));
            lines.push(format!(
                "    Latency: avg={}ms, max={}ms",
                field(wan, "avgLatency"),
                field(wan, "maxLatency"),
            ));
            lines.push(format!(
                "    Bandwidth: down={} kbps, up={} kbps",
                field(wan, "download_kbps"),
                field(wan, "upload_kbps"),
            ));
            lines.push(format!(
                "    Uptime: {}% | Packet loss: {}%",
                field(wan, "uptime"),
                field(wan, "packetLoss"),
            ));
            if let Some(isp) = wan.get("ispName") {
                lines.push(format!(
                    "    ISP: {} (ASN: {})",
                    display(isp),
                    field(wan, "ispAsn"),
                ));
            }
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

pub fn format_sdwan_configs(data: &Value) -> String {
    let configs = super::items(data);
    if configs.is_empty() {
        return "No SD-WAN configurations found.".to_string();
    }

    let mut lines = vec![format!("Found {} SD-WAN configuration(s):\n", configs.len())];
    for c in &configs {
        let name = c.get("name").and_then(Value::as_str).unwrap_or("Unnamed");
        lines.push(format!("- **{name}** (ID: `{}`)", field(c, "id")));
        lines.push(format!("  Type: {}", field(c, "type")));
        lines.push(String::new());
    }

    lines.join("\n")
}

pub fn format_sdwan_config_detail(data: &Value) -> String {
    json_detail(data.get("data").unwrap_or(data))
}

pub fn format_sdwan_config_status(data: &Value) -> String {
    json_detail(data.get("data").unwrap_or(data))
}
