//! Table and JSON rendering for command output

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use comfy_table::{presets::UTF8_BORDERS_ONLY, Cell, Table};
use serde::Serialize;
use std::fmt::Write as _;

use crate::hcloud::models::{AppliedTo, Firewall, SSHKey, Server};

const NONE: &str = "-";

fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(headers.iter().map(|h| Cell::new(*h)));
    table
}

fn timestamp(created: &DateTime<Utc>) -> String {
    created.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Pretty-print any model as JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to encode JSON output")?;
    println!("{}", json);
    Ok(())
}

pub fn servers_table(servers: &[Server]) -> Table {
    let mut table = new_table(&["ID", "NAME", "STATUS", "IP", "TYPE", "LOCATION", "CREATED"]);
    for s in servers {
        table.add_row(vec![
            s.id.to_string(),
            s.name.clone(),
            s.status.to_string(),
            s.public_ipv4().unwrap_or(NONE).to_string(),
            s.server_type.name.clone(),
            s.datacenter.location.name.clone(),
            timestamp(&s.created),
        ]);
    }
    table
}

pub fn server_details(server: &Server) -> String {
    let location = &server.datacenter.location;
    let mut out = String::new();
    let _ = writeln!(out, "ID:         {}", server.id);
    let _ = writeln!(out, "Name:       {}", server.name);
    let _ = writeln!(out, "Status:     {}", server.status);
    let _ = writeln!(out, "IPv4:       {}", server.public_ipv4().unwrap_or(NONE));
    let _ = writeln!(out, "Type:       {}", server.server_type.name);
    let _ = writeln!(out, "Datacenter: {}", server.datacenter.name);
    let _ = writeln!(out, "Location:   {} ({})", location.name, location.city);
    let _ = write!(out, "Created:    {}", timestamp(&server.created));
    out
}

pub fn ssh_keys_table(keys: &[SSHKey]) -> Table {
    let mut table = new_table(&["ID", "NAME", "FINGERPRINT"]);
    for k in keys {
        table.add_row(vec![k.id.to_string(), k.name.clone(), k.fingerprint.clone()]);
    }
    table
}

pub fn ssh_key_details(key: &SSHKey) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "ID:          {}", key.id);
    let _ = writeln!(out, "Name:        {}", key.name);
    let _ = writeln!(out, "Fingerprint: {}", key.fingerprint);
    if let Some(created) = &key.created {
        let _ = writeln!(out, "Created:     {}", timestamp(created));
    }
    let _ = write!(out, "Public Key:  {}", key.public_key);
    out
}

pub fn firewalls_table(firewalls: &[Firewall]) -> Table {
    let mut table = new_table(&["ID", "NAME", "RULES", "APPLIED TO"]);
    for f in firewalls {
        table.add_row(vec![
            f.id.to_string(),
            f.name.clone(),
            f.rules.len().to_string(),
            f.applied_to.len().to_string(),
        ]);
    }
    table
}

fn applied_target(target: &AppliedTo) -> String {
    match (&target.server, &target.label_selector) {
        (Some(server), _) => format!("{} {}", target.resource_type, server.id),
        (None, Some(selector)) => format!("{} {}", target.resource_type, selector.selector),
        (None, None) => target.resource_type.clone(),
    }
}

/// Header lines followed by the rule table, or a note when there are no rules
pub fn firewall_details(firewall: &Firewall) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "ID:         {}", firewall.id);
    let _ = writeln!(out, "Name:       {}", firewall.name);
    let _ = writeln!(out, "Applied To: {} resources", firewall.applied_to.len());
    for target in &firewall.applied_to {
        let _ = writeln!(out, "  - {}", applied_target(target));
    }
    out.push('\n');

    if firewall.rules.is_empty() {
        out.push_str("No rules configured.");
        return out;
    }

    let mut table = new_table(&["DIRECTION", "PROTOCOL", "PORT", "IPs", "DESCRIPTION"]);
    for r in &firewall.rules {
        table.add_row(vec![
            r.direction.to_string(),
            r.protocol.clone(),
            r.port.clone().unwrap_or_else(|| NONE.to_string()),
            r.peer_ips().join(", "),
            r.description.clone().unwrap_or_default(),
        ]);
    }
    out.push_str(&table.to_string());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn firewall() -> Firewall {
        serde_json::from_value(json!({
            "id": 9,
            "name": "edge",
            "rules": [
                {"direction": "in", "protocol": "tcp", "port": "80-443",
                 "source_ips": ["0.0.0.0/0"], "destination_ips": [], "description": "web"},
                {"direction": "out", "protocol": "udp", "port": "53",
                 "source_ips": [], "destination_ips": ["1.1.1.1/32"]}
            ],
            "applied_to": [
                {"type": "server", "server": {"id": 42}},
                {"type": "label_selector", "label_selector": {"selector": "env=prod"}}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_firewall_details_lists_rules_and_targets() {
        let details = firewall_details(&firewall());
        assert!(details.contains("Applied To: 2 resources"));
        assert!(details.contains("server 42"));
        assert!(details.contains("label_selector env=prod"));
        assert!(details.contains("80-443"));
        assert!(details.contains("1.1.1.1/32"));
    }

    #[test]
    fn test_firewall_without_rules() {
        let mut fw = firewall();
        fw.rules.clear();
        assert!(firewall_details(&fw).ends_with("No rules configured."));
    }

    #[test]
    fn test_ssh_keys_table_rows() {
        let keys: Vec<SSHKey> = serde_json::from_value(json!([
            {"id": 1, "name": "laptop", "fingerprint": "aa:bb"},
            {"id": 2, "name": "ci", "fingerprint": "cc:dd"}
        ]))
        .unwrap();
        let rendered = ssh_keys_table(&keys).to_string();
        assert!(rendered.contains("FINGERPRINT"));
        assert!(rendered.contains("laptop"));
        assert!(rendered.contains("cc:dd"));
    }
}
