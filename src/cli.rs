//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

/// muka - share music question links with friends
#[derive(Parser, Debug)]
#[command(name = "muka")]
#[command(version)]
#[command(about = "Issue and resolve short-lived question share links", long_about = None)]
pub struct Cli {
    /// Configuration file (default: config.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Seed the question catalog (idempotent)
    Seed,

    /// List the question catalog
    Questions,

    /// Show a link and its current state
    Show {
        /// Link hash
        hash: String,
    },

    /// Mark a link as used
    MarkUsed {
        /// Link hash
        hash: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
