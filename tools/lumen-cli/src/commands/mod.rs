//! CLI command implementations.

pub mod catalog;
pub mod config;
pub mod session;

use clap::{Args, Subcommand};

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: Option<CatalogCommand>,
}

#[derive(Subcommand)]
pub enum CatalogCommand {
    /// List all products.
    List,
    /// Show details for a single product.
    Show {
        /// Product ID.
        id: u64,
    },
    /// Write the catalog as JSON.
    Export {
        /// Output file path.
        #[arg(short, long)]
        output: String,
    },
}

/// Arguments for the session command.
#[derive(Args)]
pub struct SessionArgs {
    /// Script file; commands are read from stdin when omitted.
    pub script: Option<String>,

    /// Override the simulated add-to-cart latency in milliseconds.
    #[arg(long)]
    pub latency_ms: Option<u64>,

    /// Write the session transcript as JSON log lines.
    #[arg(long)]
    pub log_json: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
