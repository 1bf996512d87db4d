use anyhow::Result;
use colored::Colorize;

use crate::app::{get_config_dir, init_config, Config};
use crate::constants::TOKEN_KEY;
use crate::store::{FileStore, StateStore};

use super::Commands;

/// Handle CLI subcommands; returns true when the command ran to completion
/// and the UI should not start
pub async fn handle_command(command: &Commands, config: &Config) -> Result<bool> {
    match command {
        Commands::Init => {
            println!("Initializing stablehand configuration...");
            init_config()?;
            println!("Configuration initialized successfully!");
            Ok(true)
        }
        Commands::Version => {
            show_version();
            Ok(true)
        }
        Commands::Status => {
            show_status(config).await?;
            Ok(true)
        }
        Commands::Browse => Ok(false), // Continue to the catalog UI
    }
}

/// Show version information
pub fn show_version() {
    println!("stablehand v{}", env!("CARGO_PKG_VERSION"));
    println!("   A terminal client for a horse-stable management API");
}

/// Show status of configuration, stored session, and API reachability
async fn show_status(config: &Config) -> Result<()> {
    println!("stablehand Status:");
    println!();

    // Check configuration
    match get_config_dir() {
        Ok(dir) => {
            let config_path = dir.join("config.toml");
            if config_path.exists() {
                println!("  [OK] Configuration: {}", config_path.display());
            } else {
                println!("  [WARNING] Configuration: Not found (using defaults)");
            }
        }
        Err(_) => println!("  [WARNING] Configuration: No config directory"),
    }

    // Check for a stored session; the token is not validated client-side
    match FileStore::open_default() {
        Ok(store) if store.get(TOKEN_KEY).is_some() => {
            println!("  [OK] Session: Token stored");
        }
        Ok(_) => println!("  [WARNING] Session: Not logged in"),
        Err(_) => println!("  [WARNING] Session: State file unavailable"),
    }

    // Probe the API; any HTTP reply counts as reachable
    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(3))
        .build()?;
    match client.get(&config.api.base_url).send().await {
        Ok(_) => println!("  [OK] API: Reachable at {}", config.api.base_url.green()),
        Err(_) => println!("  [ERROR] API: Unreachable at {}", config.api.base_url.red()),
    }

    println!();
    Ok(())
}
