//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Estate - resolve stored property image references to public URLs
#[derive(Parser, Debug)]
#[command(name = "estate")]
#[command(about = "Resolve stored property image references to public bucket URLs", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file layered over the bundled defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve photos for the properties in a JSON document
    Resolve {
        /// Path to a property document (one object or an array)
        #[arg(long)]
        property: PathBuf,

        /// Print the properties with photos as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show how a raw reference is classified and which paths are tried
    Candidates {
        /// The stored image reference
        raw: String,

        /// Property the reference belongs to
        #[arg(long)]
        property_id: String,

        /// Owner of the property
        #[arg(long)]
        owner_id: Option<String>,
    },

    /// Print the effective configuration as TOML
    Config,
}
