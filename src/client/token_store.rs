//! Bearer token persistence

use crate::error::Result;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Fixed key the token is stored under
pub const TOKEN_KEY: &str = "AuthToken";

/// Holds the current bearer token. Tokens are opaque; nothing here inspects them.
pub trait TokenStore: Send + Sync {
    fn save_token(&self, token: &str) -> Result<()>;

    fn get_token(&self) -> Option<String>;

    /// Forget the token. Never fails; a missing token is not an error.
    fn sign_out(&self);
}

/// Token kept in `<dir>/AuthToken`, surviving restarts
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(TOKEN_KEY),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn save_token(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, token)?;
        tracing::debug!("Saved token to {}", self.path.display());
        Ok(())
    }

    fn get_token(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Some(content),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!("Failed to read token from {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn sign_out(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!("Removed token at {}", self.path.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("Failed to remove token at {}: {}", self.path.display(), e),
        }
    }
}

/// Process-local token store
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn save_token(&self, token: &str) -> Result<()> {
        *self.token.lock().unwrap_or_else(|e| e.into_inner()) = Some(token.to_string());
        Ok(())
    }

    fn get_token(&self) -> Option<String> {
        self.token.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn sign_out(&self) {
        self.token.lock().unwrap_or_else(|e| e.into_inner()).take();
    }
}
