/// Hetzner Cloud API client implementation
pub mod client;
pub mod error;
pub mod firewall;
pub mod models;
pub mod resolve;
pub mod server;
pub mod ssh_key;

pub use client::HetznerCloudClient;
pub use error::{HcloudError, Result};
pub use resolve::{NameOrId, Named};
