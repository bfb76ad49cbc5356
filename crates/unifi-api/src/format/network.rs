//! Formatters for Network API responses.

use super::{display, field, json_detail, pointer};
use serde_json::Value;

fn pagination_hint(data: &Value) -> String {
    let total = data.get("totalCount").and_then(Value::as_u64);
    let offset = data.get("offset").and_then(Value::as_u64).unwrap_or(0);
    let count = data
        .get("data")
        .and_then(Value::as_array)
        .map(Vec::len)
        .unwrap_or(0) as u64;
    match total {
        Some(total) if offset + count < total => {
            let next_offset = offset + count;
            format!("\n---\n{count} of {total} shown. Use offset={next_offset} to get the next page.")
        }
        _ => String::new(),
    }
}

pub fn format_info(data: &Value) -> String {
    let mut lines = vec!["## Application Info\n".to_string()];
    if let Some(obj) = data.as_object() {
        for (key, value) in obj {
            lines.push(format!("- **{key}**: {}", display(value)));
        }
    }
    lines.join("\n")
}

pub fn format_sites(data: &Value) -> String {
    let sites = super::items(data);
    if sites.is_empty() {
        return "No sites found.".to_string();
    }

    let mut lines = vec![format!("Found {} site(s):\n", sites.len())];
    for s in &sites {
        let name = s.get("name").and_then(Value::as_str).unwrap_or("Unnamed");
        lines.push(format!("- **{name}** (ID: `{}`)", field(s, "id")));
        if let Some(reference) = s.get("internalReference").and_then(Value::as_str) {
            if !reference.is_empty() {
                lines.push(format!("  Internal reference: {reference}"));
            }
        }
        lines.push(String::new());
    }

    lines.push(pagination_hint(data));
    lines.join("\n")
}

pub fn format_devices(data: &Value) -> String {
    let devices = super::items(data);
    if devices.is_empty() {
        return "No devices found.".to_string();
    }

    let mut lines = vec![format!("Found {} device(s):\n", devices.len())];
    for d in &devices {
        let name = d.get("name").and_then(Value::as_str).unwrap_or("Unnamed");
        let state = d.get("state").and_then(Value::as_str).unwrap_or("unknown");
        lines.push(format!("- **{name}** [{state}] (ID: `{}`)", field(d, "id")));
        lines.push(format!("  Model: {}", field(d, "model")));
        lines.push(format!(
            "  IP: {} | MAC: {}",
            field(d, "ipAddress"),
            field(d, "macAddress"),
        ));
        lines.push(format!(
            "  Firmware: {} (updatable: {})",
            field(d, "firmwareVersion"),
            field(d, "firmwareUpdatable"),
        ));
        if let Some(features) = d.get("features").and_then(Value::as_array) {
            if !features.is_empty() {
                let names: Vec<String> = features.iter().map(display).collect();
                lines.push(format!("  Features: {}", names.join(", ")));
            }
        }
        lines.push(String::new());
    }

    lines.push(pagination_hint(data));
    lines.join("\n")
}

pub fn format_device_detail(data: &Value) -> String {
    json_detail(data)
}

pub fn format_device_statistics(data: &Value) -> String {
    json_detail(data)
}

pub fn format_clients(data: &Value) -> String {
    let clients = super::items(data);
    if clients.is_empty() {
        return "No connected clients found.".to_string();
    }

    let mut lines = vec![format!("Found {} client(s):\n", clients.len())];
    for c in &clients {
        let name = c
            .get("name")
            .or_else(|| c.get("hostname"))
            .or_else(|| c.get("macAddress"))
            .and_then(Value::as_str)
            .unwrap_or("Unknown");
        lines.push(format!("- **{name}** (ID: `{}`)", field(c, "id")));
        lines.push(format!("  Type: {}", field(c, "type")));
        if let Some(ip) = c.get("ipAddress") {
            lines.push(format!("  IP: {}", display(ip)));
        }
        if let Some(mac) = c.get("macAddress") {
            lines.push(format!("  MAC: {}", display(mac)));
        }
        if let Some(connected) = c.get("connectedAt") {
            lines.push(format!("  Connected at: {}", display(connected)));
        }
        if c.get("access").is_some() {
            lines.push(format!(
                "  Access: type={}, authorized={}",
                pointer(c, "/access/type"),
                pointer(c, "/access/authorized"),
            ));
        }
        lines.push(String::new());
    }

    lines.push(pagination_hint(data));
    lines.join("\n")
}

pub fn format_client_detail(data: &Value) -> String {
    json_detail(data)
}

pub fn format_networks(data: &Value) -> String {
    let networks = super::items(data);
    if networks.is_empty() {
        return "No networks found.".to_string();
    }

    let mut lines = vec![format!("Found {} network(s):\n", networks.len())];
    for n in &networks {
        let name = n.get("name").and_then(Value::as_str).unwrap_or("Unnamed");
        lines.push(format!("- **{name}** (ID: `{}`)", field(n, "id")));
        lines.push(format!(
            "  Enabled: {} | VLAN: {}",
            field(n, "enabled"),
            field(n, "vlanId"),
        ));
        if let Some(mgmt) = n.get("management") {
            lines.push(format!("  Management: {}", display(mgmt)));
        }
        lines.push(String::new());
    }

    lines.push(pagination_hint(data));
    lines.join("\n")
}

pub fn format_network_detail(data: &Value) -> String {
    json_detail(data)
}

pub fn format_wifi(data: &Value) -> String {
    let broadcasts = super::items(data);
    if broadcasts.is_empty() {
        return "No WiFi broadcasts found.".to_string();
    }

    let mut lines = vec![format!("Found {} WiFi broadcast(s):\n", broadcasts.len())];
    for w in &broadcasts {
        let name = w.get("name").and_then(Value::as_str).unwrap_or("Unnamed");
        lines.push(format!("- **{name}** (ID: `{}`)", field(w, "id")));
        lines.push(format!(
            "  Type: {} | Enabled: {}",
            field(w, "type"),
            field(w, "enabled"),
        ));
        if w.get("hideName").and_then(Value::as_bool).unwrap_or(false) {
            lines.push("  Hidden SSID: yes".to_string());
        }
        if w.get("securityConfiguration").is_some() {
            lines.push(format!(
                "  Security: {}",
                pointer(w, "/securityConfiguration/protocol"),
            ));
        }
        lines.push(String::new());
    }

    lines.push(pagination_hint(data));
    lines.join("\n")
}

pub fn format_wifi_detail(data: &Value) -> String {
    json_detail(data)
}

pub fn format_firewall_zones(data: &Value) -> String {
    let zones = super::items(data);
    if zones.is_empty() {
        return "No firewall zones found.".to_string();
    }

    let mut lines = vec![format!("Found {} firewall zone(s):\n", zones.len())];
    for z in &zones {
        let name = z.get("name").and_then(Value::as_str).unwrap_or("Unnamed");
        lines.push(format!("- **{name}** (ID: `{}`)", field(z, "id")));
        if z.get("metadata").is_some() {
            lines.push(format!(
                "  Origin: {} | Configurable: {}",
                pointer(z, "/metadata/origin"),
                pointer(z, "/metadata/configurable"),
            ));
        }
    }
    lines.push(String::new());

    lines.push(pagination_hint(data));
    lines.join("\n")
}

pub fn format_firewall_policies(data: &Value) -> String {
    let policies = super::items(data);
    if policies.is_empty() {
        return "No firewall policies found.".to_string();
    }

    let mut lines = vec![format!("Found {} firewall policy(ies):\n", policies.len())];
    for p in &policies {
        let name = p.get("name").and_then(Value::as_str).unwrap_or("Unnamed");
        lines.push(format!("- **{name}** (ID: `{}`)", field(p, "id")));
        if p.get("source").is_some() || p.get("destination").is_some() {
            lines.push(format!(
                "  Source zone: `{}` -> Destination zone: `{}`",
                pointer(p, "/source/zoneId"),
                pointer(p, "/destination/zoneId"),
            ));
        }
    }
    lines.push(String::new());

    lines.push(pagination_hint(data));
    lines.join("\n")
}

pub fn format_dns_policies(data: &Value) -> String {
    let policies = super::items(data);
    if policies.is_empty() {
        return "No DNS policies found.".to_string();
    }

    let mut lines = vec![format!("Found {} DNS policy(ies):\n", policies.len())];
    for p in &policies {
        let name = p.get("name").and_then(Value::as_str).unwrap_or("Unnamed");
        lines.push(format!("- **{name}** (ID: `{}`)", field(p, "id")));
        lines.push(String::new());
    }

    lines.push(pagination_hint(data));
    lines.join("\n")
}

pub fn format_vouchers(data: &Value) -> String {
    let vouchers = super::items(data);
    if vouchers.is_empty() {
        return "No vouchers found.".to_string();
    }

    let mut lines = vec![format!("Found {} voucher(s):\n", vouchers.len())];
    for v in &vouchers {
        lines.push(format!(
            "- **{}** (ID: `{}`)",
            field(v, "code"),
            field(v, "id"),
        ));
        if let Some(duration) = v.get("duration") {
            lines.push(format!("  Duration: {} min", display(duration)));
        }
        if let Some(quota) = v.get("quota") {
            lines.push(format!("  Quota: {}", display(quota)));
        }
        let used = v.get("used").map(display).unwrap_or_else(|| "0".into());
        lines.push(format!("  Used: {used}"));
        lines.push(String::new());
    }

    lines.push(pagination_hint(data));
    lines.join("\n")
}

fn format_raw_list(data: &Value, label: &str, empty: &str) -> String {
    let entries = super::items(data);
    if entries.is_empty() {
        return empty.to_string();
    }

    let mut lines = vec![format!("Found {} {label}:\n", entries.len())];
    for entry in &entries {
        lines.push(format!("- {entry}"));
    }
    lines.push(String::new());
    lines.push(pagination_hint(data));
    lines.join("\n")
}

pub fn format_wans(data: &Value) -> String {
    format_raw_list(data, "WAN interface(s)", "No WAN interfaces found.")
}

pub fn format_vpn_tunnels(data: &Value) -> String {
    format_raw_list(
        data,
        "VPN tunnel(s)",
        "No site-to-site VPN tunnels found.",
    )
}

pub fn format_vpn_servers(data: &Value) -> String {
    format_raw_list(data, "VPN server(s)", "No VPN servers found.")
}

pub fn format_radius_profiles(data: &Value) -> String {
    format_raw_list(data, "RADIUS profile(s)", "No RADIUS profiles found.")
}

/// Confirmation for create/update/delete replies. A bare `status: success`
/// (204 upstream) collapses to a one-liner; anything else, typically the
/// created entity, is echoed as pretty JSON.
pub fn format_crud_result(data: &Value, action: &str) -> String {
    if data.get("status").and_then(Value::as_str) == Some("success") {
        return format!("{action} completed successfully.");
    }
    json_detail(data)
}

pub fn format_action_result(data: &Value) -> String {
    if data.get("status").and_then(Value::as_str) == Some("success") {
        return "Action executed successfully.".to_string();
    }
    json_detail(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pagination_hint_appears_when_more_pages_exist() {
        let data = json!({
            "data": [{"id": "n-1", "name": "LAN"}, {"id": "n-2", "name": "IoT"}],
            "offset": 0,
            "totalCount": 5
        });
        let out = format_networks(&data);
        assert!(out.contains("2 of 5 shown. Use offset=2 to get the next page."));
    }

    #[test]
    fn pagination_hint_absent_on_last_page() {
        let data = json!({
            "data": [{"id": "n-1"}],
            "offset": 4,
            "totalCount": 5
        });
        assert!(!format_networks(&data).contains("shown. Use offset="));
    }

    #[test]
    fn clients_prefer_name_then_hostname_then_mac() {
        let data = json!({"data": [
            {"id": "c-1", "name": "laptop", "type": "WIRELESS"},
            {"id": "c-2", "hostname": "printer", "type": "WIRED"},
            {"id": "c-3", "macAddress": "aa:bb:cc", "type": "WIRED"}
        ]});
        let out = format_clients(&data);
        assert!(out.contains("**laptop**"));
        assert!(out.contains("**printer**"));
        assert!(out.contains("**aa:bb:cc**"));
    }

    #[test]
    fn wifi_marks_hidden_ssids() {
        let data = json!({"data": [{
            "id": "w-1", "name": "guest", "type": "STANDARD", "enabled": true,
            "hideName": true,
            "securityConfiguration": {"protocol": "wpa2"}
        }]});
        let out = format_wifi(&data);
        assert!(out.contains("Hidden SSID: yes"));
        assert!(out.contains("Security: wpa2"));
    }

    #[test]
    fn crud_result_collapses_success_marker() {
        assert_eq!(
            format_crud_result(&json!({"status": "success"}), "Network deleted"),
            "Network deleted completed successfully."
        );
        let echoed = format_crud_result(&json!({"id": "n-9", "name": "iot"}), "Network created");
        assert!(echoed.contains("\"id\": \"n-9\""));
    }

    #[test]
    fn action_result_is_deterministic() {
        let data = json!({"status": "success"});
        assert_eq!(format_action_result(&data), format_action_result(&data));
        assert_eq!(format_action_result(&data), "Action executed successfully.");
    }

    #[test]
    fn info_lists_every_field() {
        let out = format_info(&json!({"applicationVersion": "9.0.108", "name": "network"}));
        assert!(out.starts_with("## Application Info"));
        assert!(out.contains("- **applicationVersion**: 9.0.108"));
        assert!(out.contains("- **name**: network"));
    }
}
