use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use parking_lot::RwLock;

use crate::identity::profile::UserProfile;

/// Snapshot of whatever the store currently holds. Slots are independent on
/// disk; pairing is enforced one level up when a session rehydrates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoredCredentials {
    pub user: Option<UserProfile>,
    pub token: Option<String>,
}

/// Where a session persists its credentials between runs. Reads never fail:
/// anything missing or unreadable comes back as an empty slot so callers
/// fall through to the anonymous state.
pub trait CredentialStore: Send + Sync {
    fn read(&self) -> StoredCredentials;
    fn write(&self, user: &UserProfile, token: &str) -> Result<()>;
    fn clear(&self);
}

#[inline]
fn user_path(root: &Path) -> PathBuf { root.join("user.json") }

#[inline]
fn token_path(root: &Path) -> PathBuf { root.join("token") }

/// Credentials under a directory: `user.json` with the profile, `token`
/// with the bearer token as plain text.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    root: PathBuf,
}

impl FileCredentialStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path { &self.root }
}

impl CredentialStore for FileCredentialStore {
    fn read(&self) -> StoredCredentials {
        let user = std::fs::read_to_string(user_path(&self.root))
            .ok()
            .and_then(|raw| serde_json::from_str::<UserProfile>(&raw).ok());
        let token = std::fs::read_to_string(token_path(&self.root))
            .ok()
            .map(|raw| raw.trim_end().to_string())
            .filter(|t| !t.is_empty());
        StoredCredentials { user, token }
    }

    fn write(&self, user: &UserProfile, token: &str) -> Result<()> {
        std::fs::create_dir_all(&self.root)
            .with_context(|| format!("create credential dir {}", self.root.display()))?;
        let profile = serde_json::to_string(user).context("serialize user profile")?;
        std::fs::write(user_path(&self.root), profile)
            .with_context(|| format!("write {}", user_path(&self.root).display()))?;
        std::fs::write(token_path(&self.root), token)
            .with_context(|| format!("write {}", token_path(&self.root).display()))?;
        Ok(())
    }

    fn clear(&self) {
        std::fs::remove_file(user_path(&self.root)).ok();
        std::fs::remove_file(token_path(&self.root)).ok();
    }
}

/// In-memory store for tests and short-lived sessions.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    inner: RwLock<StoredCredentials>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self { Self::default() }
}

impl CredentialStore for MemoryCredentialStore {
    fn read(&self) -> StoredCredentials {
        self.inner.read().clone()
    }

    fn write(&self, user: &UserProfile, token: &str) -> Result<()> {
        let mut g = self.inner.write();
        g.user = Some(user.clone());
        g.token = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) {
        let mut g = self.inner.write();
        g.user = None;
        g.token = None;
    }
}
