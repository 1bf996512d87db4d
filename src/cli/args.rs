use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "stablehand")]
#[command(version)]
#[command(about = "A terminal client for a horse-stable management API", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(short, long, env = "STABLEHAND_API_URL")]
    pub api_url: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize configuration
    Init,
    /// Browse the catalog (default)
    Browse,
    /// Show version information
    Version,
    /// Check configuration and API reachability
    Status,
}
