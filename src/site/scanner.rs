//! Collects the files of a local site directory for deployment.
//!
//! Uses `ignore::WalkBuilder` without gitignore processing: every regular
//! file is published except hidden entries (any path component starting with
//! `.`) and anything under `node_modules`.

use anyhow::{bail, Context, Result};
use ignore::WalkBuilder;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::deploy::DeployableFile;

/// GitHub rejects contents API writes above 100 MB.
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Directory names that are never published
const SKIPPED_DIRS: &[&str] = &["node_modules"];

fn build_walker(root_path: &Path) -> WalkBuilder {
    let mut builder = WalkBuilder::new(root_path);

    // Only the hidden-file filter; a site's .gitignore does not apply
    builder.standard_filters(false);
    builder.hidden(true);
    builder.follow_links(false);
    builder.filter_entry(|entry| {
        entry.depth() == 0
            || !entry
                .file_name()
                .to_str()
                .map(|name| SKIPPED_DIRS.contains(&name))
                .unwrap_or(false)
    });

    builder
}

/// Scan a site directory into deployable files, sorted by path.
pub fn scan_site(root_path: &Path) -> Result<Vec<DeployableFile>> {
    if !root_path.is_dir() {
        bail!("Site directory does not exist: {}", root_path.display());
    }

    debug!("Scanning site: {}", root_path.display());

    let mut files = Vec::new();

    for entry in build_walker(root_path).build() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("Error walking directory: {}", e);
                continue;
            }
        };

        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }

        let path = entry.path();
        let size = fs::metadata(path)
            .with_context(|| format!("Failed to read metadata for {}", path.display()))?
            .len();
        if size > MAX_FILE_SIZE {
            warn!("Skipping {} ({}): too large for GitHub", path.display(), format_size(size));
            continue;
        }

        let relative_path = path
            .strip_prefix(root_path)
            .with_context(|| format!("Failed to get relative path for {}", path.display()))?
            .to_string_lossy()
            .replace('\\', "/");

        let content =
            fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;

        files.push(DeployableFile::from_bytes(relative_path, content));
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    debug!("Found {} files in site", files.len());

    Ok(files)
}

/// Human-readable byte count
pub fn format_size(bytes: u64) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.2} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} bytes", bytes)
    }
}
