//! Deploy configuration.
//!
//! Values come from CLI flags (which fall back to environment variables via
//! clap) and otherwise use the defaults below.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

use crate::deploy::RateLimit;

/// Branch GitHub Pages serves from
pub const DEFAULT_BRANCH: &str = "main";

/// Commit message used for every uploaded file
pub const DEFAULT_COMMIT_MESSAGE: &str = "Deploy via Cloudsion";

/// Repository description for newly created sites
pub const DEFAULT_DESCRIPTION: &str = "Deployed via Cloudsion";

/// Wait after creating a repository before writing content to it
const REPO_SETTLE_DELAY_MS: u64 = 1000;

/// Wait after the Pages enable call before reading its status
const PAGES_DELAY_MS: u64 = 2000;

/// Wait before reporting the site URL, to let the Pages build start
const FINALIZE_DELAY_MS: u64 = 1000;

/// Fixed pauses between deploy phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeployTimings {
    pub repo_settle: Duration,
    pub pages: Duration,
    pub finalize: Duration,
}

impl DeployTimings {
    /// No waiting at all
    #[cfg(test)]
    pub fn immediate() -> Self {
        Self {
            repo_settle: Duration::ZERO,
            pages: Duration::ZERO,
            finalize: Duration::ZERO,
        }
    }
}

impl Default for DeployTimings {
    fn default() -> Self {
        Self {
            repo_settle: Duration::from_millis(REPO_SETTLE_DELAY_MS),
            pages: Duration::from_millis(PAGES_DELAY_MS),
            finalize: Duration::from_millis(FINALIZE_DELAY_MS),
        }
    }
}

/// Everything a deploy needs besides the credential and the files.
#[derive(Debug, Clone)]
pub struct DeployConfig {
    pub branch: String,
    pub commit_message: String,
    pub description: String,
    pub private: bool,
    pub timings: DeployTimings,
    pub rate_limit: RateLimit,
}

impl DeployConfig {
    /// Defaults without any delays
    #[cfg(test)]
    pub fn immediate() -> Self {
        Self {
            timings: DeployTimings::immediate(),
            rate_limit: RateLimit::Unlimited,
            ..Self::default()
        }
    }
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            branch: DEFAULT_BRANCH.to_string(),
            commit_message: DEFAULT_COMMIT_MESSAGE.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            private: false,
            timings: DeployTimings::default(),
            rate_limit: RateLimit::default(),
        }
    }
}

/// Resolve the state directory. Defaults to ~/.cloudsion
pub fn resolve_cache_dir(cache_dir: Option<String>) -> Result<PathBuf> {
    let base_dir = match cache_dir {
        Some(dir) => PathBuf::from(dir),
        None => dirs::home_dir()
            .context("Could not determine home directory")?
            .join(".cloudsion"),
    };

    std::fs::create_dir_all(&base_dir)
        .with_context(|| format!("Failed to create cache directory: {:?}", base_dir))?;

    Ok(base_dir)
}
