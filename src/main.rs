use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use stablehand::{
    api::ApiGateway,
    app::{load_config, load_config_from},
    cli::{handle_command, Cli},
    constants::THEME_DARK,
    notify::NoticeBoard,
    session::Session,
    store::{FileStore, MemoryStore, SharedStore},
    tui::{run_ui, App, ThemeState},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Set up logging
    stablehand::utils::init_logger(cli.verbose);

    // Load configuration
    let mut config = if let Some(config_path) = &cli.config {
        load_config_from(config_path)?
    } else {
        load_config().unwrap_or_default()
    };
    if let Some(api_url) = &cli.api_url {
        config.api.base_url = api_url.clone();
    }

    // Handle subcommands that don't start the UI
    if let Some(command) = &cli.command {
        if handle_command(command, &config).await? {
            return Ok(());
        }
    }

    // Persistent store; an unavailable state file degrades to in-memory
    // state rather than refusing to start
    let store: SharedStore = match FileStore::open_default() {
        Ok(store) => Arc::new(store),
        Err(e) => {
            warn!("State file unavailable, running without persistence: {}", e);
            Arc::new(MemoryStore::new())
        }
    };

    // Hydrate the state containers once, before anything reads them
    let notices = NoticeBoard::new();
    let session = Arc::new(Session::new(store.clone(), Arc::new(notices.clone())));
    session.hydrate();
    let theme = ThemeState::hydrate(store, config.ui.default_theme == THEME_DARK);

    let gateway = ApiGateway::new(
        &config.api.base_url,
        Duration::from_secs(config.api.timeout_secs),
        session.clone(),
        Arc::new(notices.clone()),
    )?;

    let app = App::new(session, theme, notices, config.ui.horses_per_page);
    run_ui(app, gateway).await
}
