/// Firewall operations for Hetzner Cloud
use super::client::HetznerCloudClient;
use super::error::Result;
use super::models::{Firewall, FirewallResponse};
use super::resolve::resolve;

impl HetznerCloudClient {
    /// List all firewalls in the project
    pub async fn list_firewalls(&self) -> Result<Vec<Firewall>> {
        self.get_all("/firewalls", "firewalls").await
    }

    /// Get firewall by ID
    pub async fn get_firewall_by_id(&self, firewall_id: i64) -> Result<Firewall> {
        let response: FirewallResponse = self.get(&format!("/firewalls/{}", firewall_id)).await?;
        Ok(response.firewall)
    }

    /// Get firewall by name or numeric ID
    pub async fn get_firewall(&self, name_or_id: &str) -> Result<Firewall> {
        resolve(
            name_or_id,
            "firewall",
            move |id| self.get_firewall_by_id(id),
            move || self.list_firewalls(),
        )
        .await
    }
}
