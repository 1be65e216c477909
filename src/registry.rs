//! Local registry of deployed sites.
//!
//! One `DeployRecord` per site name, stored most-recent-first in
//! `<cache-dir>/sites.json`. The registry is only written at the end of a
//! deploy (or when a site is deleted).

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A deployed site as remembered locally
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployRecord {
    /// Repository name, also the registry key
    pub name: String,
    /// Account that owns the repository
    #[serde(default)]
    pub owner: String,
    /// Public Pages URL
    pub url: String,
    pub repo_url: String,
    pub file_count: usize,
    pub last_deploy: DateTime<Utc>,
}

/// File-backed site registry
#[derive(Debug, Clone)]
pub struct SiteRegistry {
    registry_path: PathBuf,
}

impl SiteRegistry {
    /// Create a registry stored in `cache_dir`
    pub fn new(cache_dir: &Path) -> Self {
        Self {
            registry_path: cache_dir.join("sites.json"),
        }
    }

    pub fn registry_path(&self) -> &Path {
        &self.registry_path
    }

    /// All records, most recent first.
    ///
    /// A missing file is an empty registry; so is a corrupt one (the next
    /// write replaces it).
    pub fn list(&self) -> Result<Vec<DeployRecord>> {
        if !self.registry_path.exists() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.registry_path)
            .with_context(|| format!("Failed to read site registry: {:?}", self.registry_path))?;

        match serde_json::from_str(&content) {
            Ok(records) => Ok(records),
            Err(e) => {
                warn!("Ignoring unreadable site registry {:?}: {}", self.registry_path, e);
                Ok(Vec::new())
            }
        }
    }

    /// Look up a record by site name
    pub fn get(&self, name: &str) -> Result<Option<DeployRecord>> {
        Ok(self.list()?.into_iter().find(|r| r.name == name))
    }

    /// Insert or replace the record for `record.name`.
    ///
    /// The record always moves to the front, so a redeployed site is listed
    /// first.
    pub fn record(&self, record: DeployRecord) -> Result<()> {
        let mut records = self.list()?;
        records.retain(|r| r.name != record.name);
        records.insert(0, record);

        self.write(&records)
    }

    /// Remove the record for `name`. Returns whether one existed.
    pub fn remove(&self, name: &str) -> Result<bool> {
        let mut records = self.list()?;
        let before = records.len();
        records.retain(|r| r.name != name);

        if records.len() == before {
            return Ok(false);
        }

        self.write(&records)?;
        Ok(true)
    }

    fn write(&self, records: &[DeployRecord]) -> Result<()> {
        if let Some(parent) = self.registry_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let content =
            serde_json::to_string_pretty(records).context("Failed to serialize site registry")?;

        // Write to a temp file, then rename over the registry
        let tmp_path = self.registry_path.with_extension("json.tmp");
        std::fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write site registry: {:?}", tmp_path))?;
        std::fs::rename(&tmp_path, &self.registry_path).with_context(|| {
            format!("Failed to replace site registry: {:?}", self.registry_path)
        })?;

        debug!("Site registry saved to {:?}", self.registry_path);
        Ok(())
    }
}
