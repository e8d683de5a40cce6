/// Hetzner Cloud API data models
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Hetzner Cloud server resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    pub id: i64,
    pub name: String,
    pub status: ServerStatus,
    #[serde(default)]
    pub public_net: PublicNetwork,
    pub server_type: ServerType,
    pub datacenter: Datacenter,
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub labels: HashMap<String, String>,
}

impl Server {
    /// Public IPv4 address, if one is assigned
    pub fn public_ipv4(&self) -> Option<&str> {
        self.public_net.ipv4.as_ref().map(|ipv4| ipv4.ip.as_str())
    }
}

/// Lifecycle state reported by the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerStatus {
    Running,
    Initializing,
    Starting,
    Stopping,
    Off,
    Deleting,
    Migrating,
    Rebuilding,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for ServerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = match self {
            ServerStatus::Running => "running",
            ServerStatus::Initializing => "initializing",
            ServerStatus::Starting => "starting",
            ServerStatus::Stopping => "stopping",
            ServerStatus::Off => "off",
            ServerStatus::Deleting => "deleting",
            ServerStatus::Migrating => "migrating",
            ServerStatus::Rebuilding => "rebuilding",
            ServerStatus::Unknown => "unknown",
        };
        f.write_str(status)
    }
}

/// Server type information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerType {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cores: u32,
    #[serde(default)]
    pub memory: f64,
    #[serde(default)]
    pub disk: u64,
}

/// Datacenter information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Datacenter {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub location: Location,
}

/// Location information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
}

/// Public network configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PublicNetwork {
    pub ipv4: Option<IPv4>,
    pub ipv6: Option<IPv6>,
}

/// IPv4 address information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IPv4 {
    pub ip: String,
    #[serde(default)]
    pub blocked: bool,
}

/// IPv6 address information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IPv6 {
    pub ip: String,
    #[serde(default)]
    pub blocked: bool,
}

/// SSH key resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SSHKey {
    pub id: i64,
    pub name: String,
    pub fingerprint: String,
    #[serde(default)]
    pub public_key: String,
    #[serde(default)]
    pub labels: HashMap<String, String>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
}

/// Firewall resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Firewall {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub rules: Vec<FirewallRule>,
    #[serde(default)]
    pub applied_to: Vec<AppliedTo>,
    #[serde(default)]
    pub labels: HashMap<String, String>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
}

/// Traffic direction of a firewall rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "in")]
    Inbound,
    #[serde(rename = "out")]
    Outbound,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Inbound => write!(f, "in"),
            Direction::Outbound => write!(f, "out"),
        }
    }
}

/// Firewall rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirewallRule {
    pub direction: Direction,
    pub protocol: String,
    /// Single port or range such as "80" or "8000-9000"
    #[serde(default)]
    pub port: Option<String>,
    #[serde(default)]
    pub source_ips: Vec<String>,
    #[serde(default)]
    pub destination_ips: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl FirewallRule {
    /// Remote addresses the rule matches: sources for inbound, destinations for outbound
    pub fn peer_ips(&self) -> &[String] {
        match self.direction {
            Direction::Inbound => &self.source_ips,
            Direction::Outbound => &self.destination_ips,
        }
    }
}

/// Resource a firewall is applied to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppliedTo {
    #[serde(rename = "type")]
    pub resource_type: String,
    #[serde(default)]
    pub server: Option<AppliedServer>,
    #[serde(default)]
    pub label_selector: Option<LabelSelector>,
}

/// Firewall server reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppliedServer {
    pub id: i64,
}

/// Firewall label selector reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelSelector {
    pub selector: String,
}

/// Action represents an asynchronous operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    pub id: i64,
    pub command: String,
    pub status: String,
    #[serde(default)]
    pub progress: u32,
}

/// Response metadata on collection endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub pagination: Pagination,
}

/// Pagination cursor, only used while walking a collection
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub page: u64,
    #[serde(default)]
    pub per_page: u64,
    #[serde(default)]
    pub last_page: Option<u64>,
    #[serde(default)]
    pub total_entries: Option<u64>,
    #[serde(default)]
    pub previous_page: Option<u64>,
    #[serde(default)]
    pub next_page: Option<u64>,
}

/// Single server response
#[derive(Debug, Deserialize)]
pub struct ServerResponse {
    pub server: Server,
}

/// Single SSH key response, also returned on creation
#[derive(Debug, Deserialize)]
pub struct SSHKeyResponse {
    pub ssh_key: SSHKey,
}

/// Single firewall response
#[derive(Debug, Deserialize)]
pub struct FirewallResponse {
    pub firewall: Firewall,
}

/// Action list response
#[derive(Debug, Deserialize)]
pub struct ActionListResponse {
    pub actions: Vec<Action>,
}

/// Error response from API
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ApiError,
}

/// API error details
#[derive(Debug, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_server_decodes_provider_payload() {
        let server: Server = serde_json::from_value(json!({
            "id": 7,
            "name": "web-1",
            "status": "running",
            "public_net": {"ipv4": {"ip": "203.0.113.7", "blocked": false}, "ipv6": null},
            "server_type": {"name": "cx22"},
            "datacenter": {"name": "fsn1-dc14", "location": {"name": "fsn1", "city": "Falkenstein"}},
            "created": "2024-05-01T12:00:00+00:00"
        }))
        .unwrap();

        assert_eq!(server.status, ServerStatus::Running);
        assert_eq!(server.public_ipv4(), Some("203.0.113.7"));
        assert_eq!(server.datacenter.location.city, "Falkenstein");
        assert!(server.labels.is_empty());
    }

    #[test]
    fn test_unknown_status_does_not_fail() {
        let status: ServerStatus = serde_json::from_value(json!("hibernating")).unwrap();
        assert_eq!(status, ServerStatus::Unknown);
        assert_eq!(ServerStatus::Off.to_string(), "off");
    }

    #[test]
    fn test_rule_peer_ips_follow_direction() {
        let inbound: FirewallRule = serde_json::from_value(json!({
            "direction": "in",
            "protocol": "tcp",
            "port": "22",
            "source_ips": ["0.0.0.0/0"],
            "destination_ips": []
        }))
        .unwrap();
        assert_eq!(inbound.peer_ips(), ["0.0.0.0/0".to_string()]);

        let outbound: FirewallRule = serde_json::from_value(json!({
            "direction": "out",
            "protocol": "icmp",
            "source_ips": [],
            "destination_ips": ["10.0.0.0/8"],
            "description": "internal"
        }))
        .unwrap();
        assert_eq!(outbound.port, None);
        assert_eq!(outbound.peer_ips(), ["10.0.0.0/8".to_string()]);
    }

    #[test]
    fn test_error_response_tolerates_missing_fields() {
        let parsed: ErrorResponse = serde_json::from_value(json!({"error": {}})).unwrap();
        assert!(parsed.error.message.is_empty());
    }
}
