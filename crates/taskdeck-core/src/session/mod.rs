//! Session token store.
//!
//! A single process-wide holder for the access/refresh token pair. Clones of
//! [`TokenStore`] share the same state; writers replace the whole pair at once
//! so a half-updated session is never observable.

mod cache;
mod decode;

use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

pub use cache::SessionCache;
pub use decode::decode_subject;

/// Access/refresh token pair for an authenticated session.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived bearer credential.
    pub access_token: String,
    /// Longer-lived credential used to mint new access tokens.
    pub refresh_token: String,
}

impl TokenPair {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }

    /// Returns the `sub` claim of the access token, if it decodes.
    pub fn subject(&self) -> Option<String> {
        decode_subject(&self.access_token)
    }
}

impl std::fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &mask_token(&self.access_token))
            .field("refresh_token", &mask_token(&self.refresh_token))
            .finish()
    }
}

/// Shared handle to the current session.
#[derive(Clone)]
pub struct TokenStore {
    inner: Arc<Inner>,
}

struct Inner {
    tokens: RwLock<Option<TokenPair>>,
    changes: watch::Sender<Option<TokenPair>>,
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStore {
    /// Creates an empty store (no session).
    pub fn new() -> Self {
        let (changes, _) = watch::channel(None);
        Self {
            inner: Arc::new(Inner {
                tokens: RwLock::new(None),
                changes,
            }),
        }
    }

    /// Creates a store seeded with an existing session.
    pub fn with_session(pair: TokenPair) -> Self {
        let store = Self::new();
        store.replace(Some(pair));
        store
    }

    /// Replaces both tokens.
    pub fn set(&self, access_token: impl Into<String>, refresh_token: impl Into<String>) {
        self.replace(Some(TokenPair::new(access_token, refresh_token)));
    }

    /// Removes both tokens.
    pub fn clear(&self) {
        self.replace(None);
    }

    /// Returns the current pair, or `None` when there is no session.
    pub fn read(&self) -> Option<TokenPair> {
        self.inner
            .tokens
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns true if a session is installed.
    pub fn is_authenticated(&self) -> bool {
        self.inner
            .tokens
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Returns the current access token.
    pub fn access_token(&self) -> Option<String> {
        self.read().map(|pair| pair.access_token)
    }

    /// Returns the decoded subject of the current access token.
    pub fn subject(&self) -> Option<String> {
        self.read().and_then(|pair| pair.subject())
    }

    /// Subscribes to session changes.
    ///
    /// The receiver starts at the current value and is notified on every
    /// `set` / `clear`.
    pub fn subscribe(&self) -> watch::Receiver<Option<TokenPair>> {
        self.inner.changes.subscribe()
    }

    fn replace(&self, next: Option<TokenPair>) {
        let mut guard = self
            .inner
            .tokens
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = next.clone();
        // Published while the write lock is held so subscribers see writes in order.
        self.inner.changes.send_replace(next);
        drop(guard);
    }
}

/// Returns a masked version of a token for display (first 12 chars + ...).
pub fn mask_token(token: &str) -> String {
    if token.len() <= 16 || !token.is_char_boundary(12) {
        return "***".to_string();
    }
    format!("{}...", &token[..12])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_starts_without_session() {
        let store = TokenStore::new();
        assert!(store.read().is_none());
        assert!(!store.is_authenticated());
        assert!(store.subject().is_none());
    }

    #[test]
    fn test_set_replaces_both_tokens() {
        let store = TokenStore::new();
        store.set("A", "B");
        assert_eq!(store.read(), Some(TokenPair::new("A", "B")));

        store.set("C", "D");
        let pair = store.read().unwrap();
        assert_eq!(pair.access_token, "C");
        assert_eq!(pair.refresh_token, "D");
    }

    #[test]
    fn test_clear_removes_session() {
        let store = TokenStore::with_session(TokenPair::new("A", "B"));
        store.clear();
        assert!(store.read().is_none());
        assert!(store.access_token().is_none());
    }

    #[test]
    fn test_clones_share_state() {
        let store = TokenStore::new();
        let header_view = store.clone();
        store.set("A", "B");
        assert_eq!(header_view.access_token().as_deref(), Some("A"));
    }

    #[test]
    fn test_subscribers_see_changes() {
        let store = TokenStore::new();
        let mut rx = store.subscribe();
        assert!(rx.borrow_and_update().is_none());

        store.set("A", "B");
        assert!(rx.has_changed().unwrap());
        assert_eq!(
            rx.borrow_and_update().as_ref().map(|p| p.access_token.clone()),
            Some("A".to_string())
        );

        store.clear();
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_none());
    }

    #[test]
    fn test_debug_masks_tokens() {
        let pair = TokenPair::new("eyJhbGciOiJIUzI1NiJ9.payload.signature", "short");
        let debug = format!("{pair:?}");
        assert!(debug.contains("eyJhbGciOiJI..."));
        assert!(!debug.contains("signature"));
        assert!(debug.contains("***"));
    }

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("eyJhbGciOiJIUzI1NiJ9.payload"), "eyJhbGciOiJI...");
        assert_eq!(mask_token("short"), "***");
    }
}
