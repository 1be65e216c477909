//! Deploy error types.

use crate::api::RequestError;

/// Errors that abort a deploy or a repository operation.
///
/// Per-file upload failures are not represented here: they are collected into
/// the upload report and never abort a deploy.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// Any non-2xx response (or missing response) from GitHub
    #[error(transparent)]
    Request(#[from] RequestError),

    /// Repository name already taken on the account
    #[error("Repository \"{name}\" already exists. Choose a different name.")]
    Conflict { name: String },

    /// Input rejected locally or by GitHub's validation
    #[error("invalid input: {0}")]
    Validation(String),

    /// Token validation failed (invalid, expired, or no account login)
    #[error("invalid GitHub token: {0}")]
    Credential(String),

    /// The local site registry could not be updated
    #[error("failed to update site registry: {0:#}")]
    Registry(anyhow::Error),
}

impl DeployError {
    /// True when the remote reported the target as missing (404)
    pub fn is_not_found(&self) -> bool {
        matches!(self, DeployError::Request(err) if err.is_not_found())
    }
}
