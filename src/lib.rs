pub mod api;
pub mod app;
pub mod cli;
pub mod constants;
pub mod notify;
pub mod router;
pub mod session;
pub mod store;
pub mod tui;
pub mod utils;

pub use api::ApiGateway;
pub use app::{load_config, Config};
pub use tui::run_ui;
pub use utils::ApiError;
