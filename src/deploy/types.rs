//! Deploy types shared by the repository manager, uploader, publisher and
//! orchestrator.

use crate::api::RequestError;

/// Base URL for repository pages on github.com
const GITHUB_WEB_URL: &str = "https://github.com";

/// Replace every character outside `[a-z0-9-]` (after lowercasing) with `-`.
pub fn sanitize_repo_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

/// Repository coordinates: owner account and repository name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryRef {
    pub owner: String,
    pub name: String,
}

impl RepositoryRef {
    /// Build a reference from a user-supplied site name, sanitizing it
    pub fn for_site(owner: &str, site_name: &str) -> Self {
        Self {
            owner: owner.to_string(),
            name: sanitize_repo_name(site_name),
        }
    }

    /// `/repos/{owner}/{name}`
    pub fn api_path(&self) -> String {
        format!("/repos/{}/{}", self.owner, self.name)
    }

    pub fn html_url(&self) -> String {
        format!("{}/{}/{}", GITHUB_WEB_URL, self.owner, self.name)
    }

    /// Public Pages URL. Derived from the names alone, never from GitHub's
    /// response, which can be stale right after enabling.
    pub fn pages_url(&self) -> String {
        format!(
            "https://{}.github.io/{}/",
            self.owner.to_lowercase(),
            self.name
        )
    }
}

impl std::fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// A file to publish: slash-separated relative path plus raw bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployableFile {
    pub path: String,
    pub content: Vec<u8>,
    pub size: u64,
}

impl DeployableFile {
    pub fn from_bytes(path: impl Into<String>, content: Vec<u8>) -> Self {
        let size = content.len() as u64;
        Self {
            path: path.into(),
            content,
            size,
        }
    }

    #[cfg(test)]
    pub fn from_text(path: impl Into<String>, content: &str) -> Self {
        Self::from_bytes(path, content.as_bytes().to_vec())
    }

    /// Relative, non-hidden, slash-separated path without empty segments
    pub fn has_valid_path(&self) -> bool {
        !self.path.is_empty()
            && !self.path.starts_with('.')
            && !self.path.starts_with('/')
            && !self.path.contains('\\')
            && self
                .path
                .split('/')
                .all(|segment| !segment.is_empty() && segment != "." && segment != "..")
    }
}

/// Deploy phases in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Checking,
    Creating,
    Uploading,
    Enabling,
    Finalizing,
    /// Terminal: the registry is updated and the site URL is known
    Done,
}

impl Phase {
    /// Fixed progress-bar position when the phase starts
    pub fn percent(&self) -> u8 {
        match self {
            Phase::Checking => 5,
            Phase::Creating => 15,
            Phase::Uploading => 30,
            Phase::Enabling => 80,
            Phase::Finalizing => 95,
            Phase::Done => 100,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Phase::Checking => "Checking repository...",
            Phase::Creating => "Creating repository...",
            Phase::Uploading => "Uploading files...",
            Phase::Enabling => "Enabling GitHub Pages...",
            Phase::Finalizing => "Finalizing...",
            Phase::Done => "Deployed!",
        }
    }
}

/// Progress event emitted to the caller; never stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployProgress {
    pub phase: Phase,
    pub message: String,
    pub detail: Option<String>,
}

impl DeployProgress {
    pub fn new(phase: Phase) -> Self {
        Self {
            phase,
            message: phase.message().to_string(),
            detail: None,
        }
    }

    pub fn with_detail(phase: Phase, detail: String) -> Self {
        Self {
            detail: Some(detail),
            ..Self::new(phase)
        }
    }
}

/// Callback for reporting deploy progress
pub trait DeployProgressCallback: Send + Sync {
    fn on_progress(&self, progress: &DeployProgress);
}

/// No-op progress callback
#[cfg(test)]
pub struct NoOpProgress;
#[cfg(test)]
impl DeployProgressCallback for NoOpProgress {
    fn on_progress(&self, _progress: &DeployProgress) {}
}

impl<F> DeployProgressCallback for F
where
    F: Fn(&DeployProgress) + Send + Sync,
{
    fn on_progress(&self, progress: &DeployProgress) {
        self(progress)
    }
}

/// Options for repository creation
#[derive(Debug, Clone, Default)]
pub struct CreateRepoOptions {
    pub description: String,
    pub private: bool,
}

/// A file that could not be uploaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFailure {
    pub path: String,
    pub error: RequestError,
}

/// Outcome of a batch upload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadReport {
    pub succeeded: Vec<String>,
    pub failed: Vec<UploadFailure>,
}

impl UploadReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Whether Pages is serving the repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PagesStatus {
    Enabled {
        url: Option<String>,
        build_status: Option<String>,
    },
    Disabled,
}

impl PagesStatus {
    pub fn is_enabled(&self) -> bool {
        matches!(self, PagesStatus::Enabled { .. })
    }
}

/// Result of enabling Pages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishResult {
    pub enabled: bool,
    pub url: Option<String>,
    /// Latest Pages build status, when GitHub reported one
    pub build_status: Option<String>,
    pub already_enabled: bool,
}

impl PublishResult {
    /// Result for Pages confirmed on, with whatever the status read returned
    pub fn from_status(status: PagesStatus, already_enabled: bool) -> Self {
        let (url, build_status) = match status {
            PagesStatus::Enabled { url, build_status } => (url, build_status),
            PagesStatus::Disabled => (None, None),
        };
        Self {
            enabled: true,
            url,
            build_status,
            already_enabled,
        }
    }
}

/// Final result of a deploy
#[derive(Debug, Clone)]
pub struct DeployOutcome {
    /// False when any file failed to upload
    pub success: bool,
    pub site_url: String,
    pub repo: RepositoryRef,
    pub repo_url: String,
    /// True when the repository was created by this deploy
    pub created: bool,
    pub files_uploaded: usize,
    pub failures: Vec<UploadFailure>,
    pub pages: PublishResult,
}
