//! CLI command definitions and dispatch.

pub mod auth;
pub mod quota;
pub mod server;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use panel_auth::TokenStore;
use panel_client::HttpPanelClient;
use panel_core::config::PanelConfig;
use panel_core::error::PanelError;

use crate::output::OutputFormat;

/// HostPanel — command-line client for the hosting panel API
#[derive(Debug, Parser)]
#[command(name = "hostpanel", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment (reads config/<env>.toml overlays)
    #[arg(short, long, default_value = "default")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Save a session token for subsequent commands
    Login(auth::LoginArgs),
    /// Discard the saved session token
    Logout,
    /// Show who the saved token belongs to
    Whoami,
    /// Show entitlement, usage, and remaining capacity
    Quota(quota::QuotaArgs),
    /// Server inspection and limit editing
    Server(server::ServerArgs),
}

impl Cli {
    /// Execute the CLI command against loaded configuration
    pub async fn execute(&self, config: &PanelConfig) -> Result<(), PanelError> {
        let tokens = Arc::new(TokenStore::open(&config.auth.token_file)?);

        match &self.command {
            Commands::Login(args) => auth::login(args, &tokens),
            Commands::Logout => auth::logout(&tokens),
            Commands::Whoami => auth::whoami(&tokens),
            Commands::Quota(args) => {
                let api = HttpPanelClient::new(&config.api, tokens)?;
                quota::execute(args, &api, self.format).await
            }
            Commands::Server(args) => {
                let api = HttpPanelClient::new(&config.api, tokens)?;
                server::execute(args, api, self.format).await
            }
        }
    }
}
