// Gateway module for router - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod guard;
mod route;

// Public re-exports - the ONLY way to access router functionality
pub use guard::{resolve, resolve_chain, Resolution};
pub use route::Route;
