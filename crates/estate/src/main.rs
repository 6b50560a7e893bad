//! Estate CLI binary.
//!
//! This binary provides command-line access to Estate's functionality:
//! - Resolve photos for property documents against the configured bucket
//! - Inspect how a single stored reference is classified
//! - Print the effective configuration

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, load_config, resolve_document, show_candidates, show_config};

    // Pick up ESTATE__* overrides from a local .env
    let _ = dotenvy::dotenv();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize tracing; RUST_LOG wins over --verbose
    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(cli.config.as_deref())?;

    // Execute the requested command
    match cli.command {
        Commands::Resolve { property, json } => {
            resolve_document(&config, &property, json).await?;
        }

        Commands::Candidates {
            raw,
            property_id,
            owner_id,
        } => {
            show_candidates(&config, &raw, &property_id, owner_id.as_deref());
        }

        Commands::Config => {
            show_config(&config)?;
        }
    }

    Ok(())
}
