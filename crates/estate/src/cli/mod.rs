//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the estate binary.

mod candidates;
mod commands;
mod resolve;

pub use candidates::show_candidates;
pub use commands::{Cli, Commands};
pub use resolve::resolve_document;

use estate::{ConfigError, EstateConfig, EstateResult};

/// Load configuration from `path`, or from the standard locations.
pub fn load_config(path: Option<&std::path::Path>) -> EstateResult<EstateConfig> {
    match path {
        Some(path) => EstateConfig::from_file(path),
        None => EstateConfig::load(),
    }
}

/// Print the effective configuration with secrets masked.
pub fn show_config(config: &EstateConfig) -> EstateResult<()> {
    let rendered = toml::to_string_pretty(&config.redacted())
        .map_err(|e| ConfigError::new(format!("Failed to render configuration: {}", e)))?;
    print!("{}", rendered);
    Ok(())
}
