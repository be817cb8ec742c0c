//! Dynamic credential/folder resolver for Royal TS.
//!
//! Each invocation performs exactly one task and writes exactly one JSON
//! document to stdout. Diagnostics go to stderr only, so the host tool can
//! treat stdout as a pure JSON channel; any failure exits non-zero with
//! nothing on stdout.

mod config;
mod cyberark;
mod librenms;

use clap::{Parser, Subcommand};

use crate::config::{CredentialPair, MonitoringConfig, VaultConfig};

#[derive(Debug, Parser)]
#[command(name = "dynfolder", version, about = "Resolve Royal TS dynamic credentials and folders from CyberArk and LibreNMS")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Resolve one credential for the account whose name starts with the
    /// search key.
    Credential {
        /// CyberArk PVWA base URL (e.g. https://vault.example.com).
        #[arg(long, env = "DYNFOLDER_VAULT_URL")]
        vault_url: String,

        /// Vault LDAP username.
        #[arg(long, env = "DYNFOLDER_VAULT_USERNAME")]
        username: String,

        /// Vault LDAP password.
        #[arg(long, env = "DYNFOLDER_VAULT_PASSWORD", hide_env_values = true)]
        password: String,

        /// Account search key, matched with starts-with semantics
        /// (typically the target computer name).
        #[arg(long)]
        search: String,
    },
    /// Enumerate every account in a safe as credential entries.
    Safe {
        /// CyberArk PVWA base URL.
        #[arg(long, env = "DYNFOLDER_VAULT_URL")]
        vault_url: String,

        /// Vault LDAP username.
        #[arg(long, env = "DYNFOLDER_VAULT_USERNAME")]
        username: String,

        /// Vault LDAP password.
        #[arg(long, env = "DYNFOLDER_VAULT_PASSWORD", hide_env_values = true)]
        password: String,

        /// Name of the safe to enumerate.
        #[arg(long)]
        safe: String,
    },
    /// List monitored devices as SSH connection entries.
    Devices {
        /// LibreNMS base URL (e.g. https://nms.example.com).
        #[arg(long, env = "DYNFOLDER_NMS_URL")]
        nms_url: String,

        /// LibreNMS API key with read access.
        #[arg(long, env = "DYNFOLDER_NMS_API_KEY", hide_env_values = true)]
        api_key: String,
    },
}

#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error(transparent)]
    Vault(#[from] cyberark::VaultError),

    #[error(transparent)]
    Monitoring(#[from] librenms::NmsError),

    #[error("failed to encode output document")]
    Encode(#[source] serde_json::Error),
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();
    match run(cli.cmd).await {
        Ok(document) => println!("{document}"),
        Err(err) => {
            eprintln!("dynfolder: {err}");
            std::process::exit(1);
        }
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    // stdout carries the output document; all diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cmd: Cmd) -> Result<String, RunError> {
    match cmd {
        Cmd::Credential {
            vault_url,
            username,
            password,
            search,
        } => {
            let config = VaultConfig {
                endpoint: vault_url,
                credentials: CredentialPair { username, password },
            };
            let document = cyberark::resolve_credential(&config, &search).await?;
            serde_json::to_string(&document).map_err(RunError::Encode)
        }
        Cmd::Safe {
            vault_url,
            username,
            password,
            safe,
        } => {
            let config = VaultConfig {
                endpoint: vault_url,
                credentials: CredentialPair { username, password },
            };
            let document = cyberark::resolve_safe(&config, &safe).await?;
            serde_json::to_string(&document).map_err(RunError::Encode)
        }
        Cmd::Devices { nms_url, api_key } => {
            let config = MonitoringConfig {
                endpoint: nms_url,
                api_key,
            };
            let document = librenms::resolve_devices(&config).await?;
            serde_json::to_string(&document).map_err(RunError::Encode)
        }
    }
}
