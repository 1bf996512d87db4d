// Gateway module for api - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod client;
mod types;

// Public re-exports - the ONLY way to access api functionality
pub use client::ApiGateway;
pub use types::{or_na, value_or_na, Horse, Owner, Package, Place, Service};
