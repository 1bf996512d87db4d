use std::sync::Arc;

/// Shared handle to a persistent key-value store
pub type SharedStore = Arc<dyn StateStore>;

/// Key-value persistence behind the session and theme containers.
///
/// Writes are fire-and-forget: implementations log failures instead of
/// returning them, and callers never await durability.
pub trait StateStore: Send + Sync {
    /// Read a value, `None` if the key was never set or was removed
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, overwriting any previous one
    fn set(&self, key: &str, value: &str);

    /// Remove a key; removing an absent key is a no-op
    fn remove(&self, key: &str);
}
