// Gateway module for TUI - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod app;
mod form;
mod render;
mod theme;
mod ui;

// Public re-exports - the ONLY way to access TUI functionality
pub use app::{filter_horses, App, Completion, DetailView, ListFocus, ListView};
pub use form::{validate_email, validate_password, LoginField, LoginForm};
pub use theme::{Theme, ThemeState};
pub use ui::run_ui;
