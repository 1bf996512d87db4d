// Gateway module for notify - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod center;

// Public re-exports - the ONLY way to access notify functionality
pub use center::{Notice, NoticeBoard, NotificationCenter, Notifier, Severity, SharedNotifier};
