//! On-disk persistence for the session token pair.
//!
//! Stores the session in `<base>/session.json` with restricted permissions (0600).
//! Tokens are never logged or displayed in full.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::{TokenPair, TokenStore};
use crate::config::paths;

/// Session cache filename.
const SESSION_CACHE_FILE: &str = "session.json";

/// File-backed copy of the [`TokenStore`] contents.
#[derive(Debug, Clone)]
pub struct SessionCache {
    path: PathBuf,
}

impl Default for SessionCache {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}

impl SessionCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the default path of the session cache file.
    pub fn default_path() -> PathBuf {
        paths::taskdeck_home().join(SESSION_CACHE_FILE)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the cached session.
    /// Returns `None` if the file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<Option<TokenPair>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session from {}", self.path.display()))?;

        let pair = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse session from {}", self.path.display()))?;
        Ok(Some(pair))
    }

    /// Builds a [`TokenStore`] from the cached session.
    ///
    /// A missing or unreadable cache yields an empty store; the file is left
    /// in place so a later logout can remove it.
    pub fn restore(&self) -> TokenStore {
        match self.load() {
            Ok(Some(pair)) => TokenStore::with_session(pair),
            Ok(None) => TokenStore::new(),
            Err(err) => {
                tracing::warn!(error = %format!("{err:#}"), "ignoring unreadable session cache");
                TokenStore::new()
            }
        }
    }

    /// Mirrors the store into the cache: writes the pair, or removes the file
    /// when there is no session.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written or removed.
    pub fn sync(&self, store: &TokenStore) -> Result<()> {
        match store.read() {
            Some(pair) => self.save(&pair),
            None => self.remove().map(|_| ()),
        }
    }

    /// Saves the session to disk with restricted permissions (0600).
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub fn save(&self, pair: &TokenPair) -> Result<()> {
        let path = &self.path;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents = serde_json::to_string_pretty(pair).context("Failed to serialize session")?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(path)
                .with_context(|| format!("Failed to open {} for writing", path.display()))?;
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", path.display()))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(path, contents)
                .with_context(|| format!("Failed to write to {}", path.display()))?;
        }

        tracing::debug!(path = %path.display(), "session saved");
        Ok(())
    }

    /// Removes the cache file. Returns true if a session was on disk.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be removed.
    pub fn remove(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path)
            .with_context(|| format!("Failed to remove {}", self.path.display()))?;
        tracing::debug!(path = %self.path.display(), "session removed");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_no_session() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SessionCache::new(dir.path().join("session.json"));
        assert!(cache.load().unwrap().is_none());
        assert!(!cache.restore().is_authenticated());
    }

    #[test]
    fn test_save_then_restore() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SessionCache::new(dir.path().join("nested").join("session.json"));
        cache.save(&TokenPair::new("access", "refresh")).unwrap();

        let store = cache.restore();
        assert_eq!(store.read(), Some(TokenPair::new("access", "refresh")));
    }

    #[cfg(unix)]
    #[test]
    fn test_save_restricts_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let cache = SessionCache::new(dir.path().join("session.json"));
        cache.save(&TokenPair::new("a", "r")).unwrap();

        let mode = fs::metadata(cache.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_sync_follows_store() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SessionCache::new(dir.path().join("session.json"));
        let store = TokenStore::new();

        store.set("A", "B");
        cache.sync(&store).unwrap();
        assert!(cache.path().exists());

        store.clear();
        cache.sync(&store).unwrap();
        assert!(!cache.path().exists());
        assert!(!cache.remove().unwrap());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SessionCache::new(dir.path().join("session.json"));
        fs::write(cache.path(), "{ not json").unwrap();
        let err = cache.load().unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse session"));
    }

    #[test]
    fn test_corrupt_file_restores_empty_and_can_be_removed() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SessionCache::new(dir.path().join("session.json"));
        fs::write(cache.path(), "{ not json").unwrap();

        assert!(!cache.restore().is_authenticated());
        assert!(cache.path().exists());
        assert!(cache.remove().unwrap());
        assert!(!cache.path().exists());
    }
}
