// Gateway module for store - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod file;
mod memory;
mod traits;

// Public re-exports - the ONLY way to access store functionality
pub use file::FileStore;
pub use memory::MemoryStore;
pub use traits::{SharedStore, StateStore};
