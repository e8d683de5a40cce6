/// Server operations for Hetzner Cloud
use tracing::debug;

use super::client::HetznerCloudClient;
use super::error::Result;
use super::models::{Server, ServerResponse};
use super::resolve::resolve;

impl HetznerCloudClient {
    /// List all servers in the project
    pub async fn list_servers(&self) -> Result<Vec<Server>> {
        self.get_all("/servers", "servers").await
    }

    /// Get server by ID
    pub async fn get_server_by_id(&self, server_id: i64) -> Result<Server> {
        let response: ServerResponse = self.get(&format!("/servers/{}", server_id)).await?;
        Ok(response.server)
    }

    /// Get server by name or numeric ID
    pub async fn get_server(&self, name_or_id: &str) -> Result<Server> {
        let server = resolve(
            name_or_id,
            "server",
            move |id| self.get_server_by_id(id),
            move || self.list_servers(),
        )
        .await?;
        debug!("Resolved server {} to ID {}", name_or_id, server.id);
        Ok(server)
    }
}
