//! ledrelay CLI
//!
//! Relay LED on/off state between a UDP sender (typically the companion
//! Linux kernel module) and a local status display.

use clap::Parser;

// CLI definitions
mod cli;
use cli::{Cli, Commands};

// Command handlers
mod commands;

use ledrelay::Config;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::load_default().map_err(|e| format!("load config: {e}"))?;

    match cli.command {
        Commands::Listen {
            port,
            fallback_brightness,
            quiet,
        } => {
            let mut config = config;
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(fallback) = fallback_brightness {
                config.fallback_brightness = fallback;
            }
            commands::listen::listen(&config, quiet)?;
        }

        Commands::Send { led, state, to } => {
            let destination = to.as_deref().unwrap_or(&config.destination);
            commands::send::send(&led, &state, destination)?;
        }

        Commands::Status => {
            commands::status::status(&config)?;
        }
    }

    Ok(())
}
