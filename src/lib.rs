//! Fornost - inspect and manage Hetzner Cloud servers, SSH keys and firewalls
//!
//! The [`hcloud`] module is the API client; [`config`], [`output`] and
//! [`pubkey`] support the command-line front end.
pub mod config;
pub mod hcloud;
pub mod output;
pub mod pubkey;
