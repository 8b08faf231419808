//! Credential storage for cloud quantum providers.
//!
//! The cloud connectivity flow authenticates with a raw API token. This
//! module persists that token to the user configuration directory so the
//! hardware test can run without re-entering it, mirroring the provider's
//! own `save_account` behaviour.
//!
//! # Example
//!
//! ```ignore
//! use eir_hal::CredentialStore;
//!
//! let store = CredentialStore::default_path()?;
//! store.save("my-api-token")?;
//!
//! let creds = store.load()?;
//! println!("token saved at {}", creds.saved_at);
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{HalError, HalResult};

/// A saved cloud credential.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// The API token.
    pub token: String,
    /// When the credential was saved.
    pub saved_at: DateTime<Utc>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"[REDACTED]")
            .field("saved_at", &self.saved_at)
            .finish()
    }
}

/// File-backed credential store.
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Create a store at an explicit path (used by tests).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a store at the default location:
    /// `<config_dir>/eir/credentials.json`.
    pub fn default_path() -> HalResult<Self> {
        let base = dirs::config_dir()
            .ok_or_else(|| HalError::Auth("no user configuration directory found".to_string()))?;
        Ok(Self {
            path: base.join("eir/credentials.json"),
        })
    }

    /// Path of the credential file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check whether a credential has been saved.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Save an API token, overwriting any existing credential.
    pub fn save(&self, token: impl Into<String>) -> HalResult<()> {
        let creds = Credentials {
            token: token.into(),
            saved_at: Utc::now(),
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| HalError::Auth(format!("failed to create credential dir: {e}")))?;
        }

        let json = serde_json::to_string_pretty(&creds)?;
        std::fs::write(&self.path, json)
            .map_err(|e| HalError::Auth(format!("failed to write credentials: {e}")))?;

        // Token file readable by the owner only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&self.path)
                .map_err(|e| HalError::Auth(format!("failed to read file metadata: {e}")))?
                .permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&self.path, perms)
                .map_err(|e| HalError::Auth(format!("failed to set permissions: {e}")))?;
        }

        tracing::info!("credential saved to {}", self.path.display());
        Ok(())
    }

    /// Load the saved credential.
    pub fn load(&self) -> HalResult<Credentials> {
        let content = std::fs::read_to_string(&self.path).map_err(|_| {
            HalError::Auth(format!(
                "no credential found at {}; run 'eir auth set-token <TOKEN>' first",
                self.path.display()
            ))
        })?;
        let creds: Credentials = serde_json::from_str(&content)?;
        Ok(creds)
    }

    /// Delete the saved credential.
    pub fn delete(&self) -> HalResult<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)
                .map_err(|e| HalError::Auth(format!("failed to remove credentials: {e}")))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(dir.path().join("credentials.json"));

        assert!(!store.exists());
        store.save("test-token-123").unwrap();
        assert!(store.exists());

        let creds = store.load().unwrap();
        assert_eq!(creds.token, "test-token-123");
    }

    #[test]
    fn test_save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(dir.path().join("credentials.json"));

        store.save("first").unwrap();
        store.save("second").unwrap();
        assert_eq!(store.load().unwrap().token, "second");
    }

    #[test]
    fn test_load_missing_mentions_setup() {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(dir.path().join("credentials.json"));

        let err = store.load().unwrap_err();
        assert!(err.to_string().contains("auth set-token"));
    }

    #[cfg(unix)]
    #[test]
    fn test_restrictive_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(dir.path().join("credentials.json"));
        store.save("token").unwrap();

        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_debug_redacts_token() {
        let creds = Credentials {
            token: "super-secret".to_string(),
            saved_at: Utc::now(),
        };
        let debug = format!("{creds:?}");
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn test_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(dir.path().join("credentials.json"));
        store.save("token").unwrap();
        store.delete().unwrap();
        assert!(!store.exists());
    }
}
