//! Fornost - Hetzner Cloud inspection CLI
//!
//! Lists and inspects servers, SSH keys and firewalls, uploads and deletes SSH
//! keys, and verifies API credentials.
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fornost::config::Settings;
use fornost::hcloud::HetznerCloudClient;
use fornost::output;
use fornost::pubkey;

#[derive(Parser)]
#[command(name = "fornost", version)]
#[command(about = "Inspect and manage Hetzner Cloud servers, SSH keys and firewalls", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Hetzner Cloud API token (defaults to HETZNER_API_TOKEN or HCLOUD_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the API root URL
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify credentials and connectivity
    Ping,

    /// Manage Hetzner Cloud servers
    #[command(subcommand)]
    Server(ServerCommand),

    /// Manage Hetzner Cloud SSH keys
    #[command(subcommand)]
    Ssh(SshCommand),

    /// Manage Hetzner Cloud firewalls
    #[command(subcommand)]
    Firewall(FirewallCommand),
}

#[derive(Subcommand)]
enum ServerCommand {
    /// List all servers in the project
    List,
    /// Get details for a specific server
    Get {
        /// Server name or numeric ID
        name_or_id: String,
    },
}

#[derive(Subcommand)]
enum SshCommand {
    /// List all SSH keys in the project
    List,
    /// Get details for a specific SSH key
    Get {
        /// Key name or numeric ID
        name_or_id: String,
    },
    /// Upload a new SSH key
    #[command(after_help = "Example:\n  fornost ssh add --name my-key --key ~/.ssh/id_ed25519.pub")]
    Add {
        /// Name for the key in Hetzner
        #[arg(long)]
        name: String,

        /// Path to public key file
        #[arg(long)]
        key: PathBuf,
    },
    /// Delete an SSH key by name or ID
    Delete {
        /// Key name or numeric ID
        name_or_id: String,
    },
}

#[derive(Subcommand)]
enum FirewallCommand {
    /// List all firewalls in the project
    List,
    /// Get rules for a specific firewall
    Get {
        /// Firewall name or numeric ID
        name_or_id: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine readable
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("fornost={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(&cli).await {
        error!("Command failed: {:#}", e);
        report_error(&mut std::io::stderr(), &e);
        std::process::exit(1);
    }
}

/// Print the full error chain for the user, independent of the log filter
fn report_error<W: Write>(out: &mut W, err: &anyhow::Error) {
    let _ = writeln!(out, "Error: {:#}", err);
}

async fn run(cli: &Cli) -> Result<()> {
    let client = build_client(cli)?;
    match &cli.command {
        Commands::Ping => ping(&client).await,
        Commands::Server(cmd) => server(cli, &client, cmd).await,
        Commands::Ssh(cmd) => ssh(cli, &client, cmd).await,
        Commands::Firewall(cmd) => firewall(cli, &client, cmd).await,
    }
}

/// Create the API client from flags, environment and config file
fn build_client(cli: &Cli) -> Result<HetznerCloudClient> {
    let settings = Settings::resolve(
        cli.token.clone(),
        cli.endpoint.clone(),
        cli.config.as_deref(),
    )?;

    let client = HetznerCloudClient::new(settings.token)?;
    match settings.endpoint {
        Some(endpoint) => Ok(client.with_base_url(&endpoint)?),
        None => Ok(client),
    }
}

async fn ping(client: &HetznerCloudClient) -> Result<()> {
    client.ping().await.context("ping failed")?;
    println!("Credentials valid. Connection successful.");
    Ok(())
}

async fn server(cli: &Cli, client: &HetznerCloudClient, cmd: &ServerCommand) -> Result<()> {
    match cmd {
        ServerCommand::List => {
            let servers = client.list_servers().await?;
            if cli.json {
                return output::print_json(&servers);
            }
            if servers.is_empty() {
                println!("No servers found.");
            } else {
                println!("{}", output::servers_table(&servers));
            }
        }
        ServerCommand::Get { name_or_id } => {
            let server = client.get_server(name_or_id).await?;
            if cli.json {
                return output::print_json(&server);
            }
            println!("{}", output::server_details(&server));
        }
    }
    Ok(())
}

async fn ssh(cli: &Cli, client: &HetznerCloudClient, cmd: &SshCommand) -> Result<()> {
    match cmd {
        SshCommand::List => {
            let keys = client.list_ssh_keys().await?;
            if cli.json {
                return output::print_json(&keys);
            }
            if keys.is_empty() {
                println!("No SSH keys found.");
            } else {
                println!("{}", output::ssh_keys_table(&keys));
            }
        }
        SshCommand::Get { name_or_id } => {
            let key = client.get_ssh_key(name_or_id).await?;
            if cli.json {
                return output::print_json(&key);
            }
            println!("{}", output::ssh_key_details(&key));
        }
        SshCommand::Add { name, key } => {
            if name.trim().is_empty() {
                anyhow::bail!("--name must not be empty");
            }
            let public_key = pubkey::read_public_key(key)?;
            let created = client.add_ssh_key(name, &public_key).await?;
            if cli.json {
                return output::print_json(&created);
            }
            println!(
                "Created SSH key {:?} (ID: {}, Fingerprint: {})",
                created.name, created.id, created.fingerprint
            );
        }
        SshCommand::Delete { name_or_id } => {
            let id = client.delete_ssh_key(name_or_id).await?;
            println!("Deleted SSH key {:?} (ID: {})", name_or_id, id);
        }
    }
    Ok(())
}

async fn firewall(cli: &Cli, client: &HetznerCloudClient, cmd: &FirewallCommand) -> Result<()> {
    match cmd {
        FirewallCommand::List => {
            let firewalls = client.list_firewalls().await?;
            if cli.json {
                return output::print_json(&firewalls);
            }
            if firewalls.is_empty() {
                println!("No firewalls found.");
            } else {
                println!("{}", output::firewalls_table(&firewalls));
            }
        }
        FirewallCommand::Get { name_or_id } => {
            let firewall = client.get_firewall(name_or_id).await?;
            if cli.json {
                return output::print_json(&firewall);
            }
            println!("{}", output::firewall_details(&firewall));
        }
    }
    Ok(())
}
