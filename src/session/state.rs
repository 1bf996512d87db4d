use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;

use crate::constants::TOKEN_KEY;
use crate::notify::{Notifier, SharedNotifier};
use crate::store::SharedStore;

/// Shared handle to the session container; cloned into the UI and the
/// API gateway, mutated only through `login`/`logout`
pub type SharedSession = Arc<Session>;

/// The current authentication token and its write-through persistence.
///
/// Authentication status is always derived from token presence; no separate
/// boolean is ever stored.
pub struct Session {
    token: Mutex<Option<String>>,
    store: SharedStore,
    notifier: SharedNotifier,
}

impl Session {
    pub fn new(store: SharedStore, notifier: SharedNotifier) -> Self {
        Self {
            token: Mutex::new(None),
            store,
            notifier,
        }
    }

    /// Populate the in-memory token from the store, once at startup.
    ///
    /// The token is not validated against the server; a stale token is used
    /// until the server rejects it.
    pub fn hydrate(&self) {
        if let Some(saved) = self.store.get(TOKEN_KEY) {
            debug!("Restored session token from store");
            *self.token.lock() = Some(saved);
        }
    }

    /// Save the token in both memory and the store.
    ///
    /// Idempotent when the token is unchanged: no redundant store write.
    pub fn login(&self, new_token: &str) {
        let mut token = self.token.lock();
        if token.as_deref() != Some(new_token) {
            *token = Some(new_token.to_string());
            self.store.set(TOKEN_KEY, new_token);
        }
    }

    /// Clear the token from both memory and the store.
    ///
    /// Always succeeds, even when no session existed.
    pub fn logout(&self) {
        *self.token.lock() = None;
        self.store.remove(TOKEN_KEY);
        self.notifier.success("You have logged out successfully!");
    }

    /// Auth status: true if a token exists
    pub fn is_authenticated(&self) -> bool {
        self.token.lock().is_some()
    }

    /// Current token, read fresh on every call
    pub fn token(&self) -> Option<String> {
        self.token.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NoticeBoard;
    use crate::store::{MemoryStore, StateStore};
    use pretty_assertions::assert_eq;

    fn session_with_store(store: Arc<MemoryStore>) -> Session {
        Session::new(store, Arc::new(NoticeBoard::new()))
    }

    #[test]
    fn test_hydrate_without_stored_token() {
        let session = session_with_store(Arc::new(MemoryStore::new()));
        session.hydrate();
        assert!(!session.is_authenticated());
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_hydrate_with_stored_token() {
        let store = Arc::new(MemoryStore::new());
        store.set(TOKEN_KEY, "abc");

        let session = session_with_store(store);
        session.hydrate();
        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some("abc".to_string()));
    }

    #[test]
    fn test_login_stores_token() {
        let store = Arc::new(MemoryStore::new());
        let session = session_with_store(store.clone());

        session.login("tok-1");
        assert!(session.is_authenticated());
        assert_eq!(store.get(TOKEN_KEY), Some("tok-1".to_string()));

        session.login("tok-2");
        assert_eq!(session.token(), Some("tok-2".to_string()));
        assert_eq!(store.get(TOKEN_KEY), Some("tok-2".to_string()));
    }

    #[test]
    fn test_logout_clears_everything_and_is_idempotent() {
        let store = Arc::new(MemoryStore::new());
        let board = NoticeBoard::new();
        let session = Session::new(store.clone(), Arc::new(board.clone()));

        session.login("tok");
        session.logout();
        assert!(!session.is_authenticated());
        assert_eq!(store.get(TOKEN_KEY), None);
        assert_eq!(board.snapshot().len(), 1);

        // Logging out with no session still succeeds
        session.logout();
        assert!(!session.is_authenticated());
    }
}
