/// SSH key management for Hetzner Cloud
use serde::Serialize;
use tracing::{debug, info};

use super::client::HetznerCloudClient;
use super::error::Result;
use super::models::{SSHKey, SSHKeyResponse};
use super::resolve::{resolve, resolve_id};

#[derive(Serialize)]
struct CreateSSHKeyRequest<'a> {
    name: &'a str,
    public_key: &'a str,
}

impl HetznerCloudClient {
    /// List all SSH keys in the project
    pub async fn list_ssh_keys(&self) -> Result<Vec<SSHKey>> {
        self.get_all("/ssh_keys", "ssh_keys").await
    }

    /// Get SSH key by ID
    pub async fn get_ssh_key_by_id(&self, key_id: i64) -> Result<SSHKey> {
        let response: SSHKeyResponse = self.get(&format!("/ssh_keys/{}", key_id)).await?;
        Ok(response.ssh_key)
    }

    /// Get SSH key by name or numeric ID
    pub async fn get_ssh_key(&self, name_or_id: &str) -> Result<SSHKey> {
        resolve(
            name_or_id,
            "ssh key",
            move |id| self.get_ssh_key_by_id(id),
            move || self.list_ssh_keys(),
        )
        .await
    }

    /// Upload a public key to the project.
    ///
    /// `public_key` is sent as given; callers trim surrounding whitespace.
    /// Uploading the same key twice is not deduplicated here, the provider
    /// either creates a second key or rejects it.
    pub async fn add_ssh_key(&self, name: &str, public_key: &str) -> Result<SSHKey> {
        let request = CreateSSHKeyRequest { name, public_key };
        let response: SSHKeyResponse = self.post("/ssh_keys", &request).await?;
        info!(
            "SSH key created: {} (ID: {})",
            response.ssh_key.name, response.ssh_key.id
        );
        Ok(response.ssh_key)
    }

    /// Delete SSH key by name or numeric ID, returning the deleted ID.
    ///
    /// Numeric tokens are deleted directly; an unknown name fails before any
    /// delete request is sent.
    pub async fn delete_ssh_key(&self, name_or_id: &str) -> Result<i64> {
        let key_id = resolve_id(name_or_id, "ssh key", move || self.list_ssh_keys()).await?;
        debug!("Deleting SSH key ID: {}", key_id);
        self.delete(&format!("/ssh_keys/{}", key_id)).await?;
        Ok(key_id)
    }
}
