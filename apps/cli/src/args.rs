//! # CLI Argument Definitions

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// The main CLI structure parsing command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "autoapi")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Derive REST routes from service naming conventions")]
pub struct Cli {
    /// Settings file (TOML, JSON or YAML). Defaults to `autoapi.*` in the working directory
    #[arg(short, long, global = true)]
    pub settings: Option<PathBuf>,

    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the routes derived from a type inventory
    Routes {
        /// JSON inventory exported by the host
        #[arg(short, long)]
        inventory: PathBuf,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Validate the settings and print the effective conventions
    Check {},
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One aligned line per route
    Text,
    /// Flat JSON array of routes
    Json,
    /// The complete service and action descriptors as JSON
    Full,
}
