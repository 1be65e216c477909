//! Credential storage for the GitHub token.
//!
//! This module handles persisting and retrieving the validated token together
//! with the account login it resolved to.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Environment variable holding a token that overrides the stored credential
pub const TOKEN_ENV: &str = "CLOUDSION_GITHUB_TOKEN";

/// A validated GitHub token and the account it belongs to.
///
/// Passed explicitly into every API, manager and deploy call.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub token: String,
    /// Account login, used as the repository owner namespace
    pub login: String,
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("login", &self.login)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// Token from the environment, if set and non-empty
pub fn token_from_env() -> Option<String> {
    std::env::var(TOKEN_ENV)
        .ok()
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

/// Credential store
///
/// Manages credential persistence in ~/.cloudsion/credential.json (or a custom
/// cache directory).
pub struct CredentialStore {
    credential_path: PathBuf,
}

impl CredentialStore {
    /// Create a new credential store rooted at `cache_dir`
    pub fn new(cache_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(cache_dir)
            .with_context(|| format!("Failed to create cache directory: {:?}", cache_dir))?;

        Ok(Self {
            credential_path: cache_dir.join("credential.json"),
        })
    }

    /// Get the credential file path
    pub fn credential_path(&self) -> &PathBuf {
        &self.credential_path
    }

    /// Check whether a usable credential is stored
    pub fn is_logged_in(&self) -> bool {
        match self.load() {
            Ok(credential) => credential.is_some(),
            Err(e) => {
                error!("Failed to read credential file: {}", e);
                false
            }
        }
    }

    fn parse_credential(raw: &str) -> Option<Credential> {
        match serde_json::from_str::<Credential>(raw) {
            Ok(credential) => {
                if credential.token.is_empty() || credential.login.is_empty() {
                    warn!("Credential validation failed: missing token or login");
                    return None;
                }
                Some(credential)
            }
            Err(e) => {
                warn!("Failed to parse credential JSON: {}", e);
                None
            }
        }
    }

    /// Load the stored credential.
    ///
    /// An unreadable or incomplete credential file is removed and reported as
    /// "not logged in".
    pub fn load(&self) -> Result<Option<Credential>> {
        if !self.credential_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.credential_path).with_context(|| {
            format!("Failed to read credential file: {:?}", self.credential_path)
        })?;

        if let Some(credential) = Self::parse_credential(&content) {
            return Ok(Some(credential));
        }

        warn!("Invalid credential data found, removing credential file");
        let _ = self.remove();
        Ok(None)
    }

    /// Save a validated credential
    pub fn save(&self, credential: &Credential) -> Result<()> {
        let content = serde_json::to_string_pretty(credential)
            .context("Failed to serialize credential")?;

        std::fs::write(&self.credential_path, content).with_context(|| {
            format!("Failed to write credential file: {:?}", self.credential_path)
        })?;

        info!("Credential saved for {}", credential.login);
        debug!("Credential saved to {:?}", self.credential_path);

        Ok(())
    }

    /// Remove the stored credential
    pub fn remove(&self) -> Result<()> {
        if self.credential_path.exists() {
            std::fs::remove_file(&self.credential_path).with_context(|| {
                format!("Failed to remove credential file: {:?}", self.credential_path)
            })?;
        }

        info!("Credential removed");

        Ok(())
    }
}
