//! HostPanel CLI entry point.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

mod commands;
mod output;

use commands::Cli;
use panel_core::config::PanelConfig;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match PanelConfig::load(&cli.env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = cli.execute(&config).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &PanelConfig) {
    let filter = log_filter(config, EnvFilter::try_from_default_env().ok());

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().with_env_filter(filter).init();
        }
    }
}

/// The environment takes precedence; the configured level is the fallback.
fn log_filter(config: &PanelConfig, env_override: Option<EnvFilter>) -> EnvFilter {
    env_override.unwrap_or_else(|| EnvFilter::new(&config.logging.level))
}
