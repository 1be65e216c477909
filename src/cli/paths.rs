use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Resolve a site directory argument to an absolute path.
pub fn resolve_site_dir(dir: &str) -> Result<PathBuf> {
    let path = PathBuf::from(dir)
        .canonicalize()
        .with_context(|| format!("Site directory does not exist: {}", dir))?;

    if !path.is_dir() {
        anyhow::bail!("Not a directory: {}", path.display());
    }

    Ok(path)
}

/// Site name derived from the directory's own name
pub fn default_site_name(dir: &Path) -> Option<String> {
    dir.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .filter(|name| !name.is_empty())
}
