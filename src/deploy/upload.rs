//! File upload through the GitHub contents API.
//!
//! Each file is written with a single `PUT contents/{path}`. When a file
//! already exists at the path, its current `sha` is read first and sent along
//! so GitHub updates it in place; otherwise the write is a plain create.
//! Batches are uploaded strictly one file at a time.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::Method;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::api::{ApiClient, ContentFile, PutContentRequest, RequestError};
use crate::session::Credential;

use super::types::{DeployableFile, RepositoryRef, UploadFailure, UploadReport};

/// Pause between consecutive file uploads
const DEFAULT_UPLOAD_INTERVAL_MS: u64 = 250;

/// Pacing policy applied between uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimit {
    /// Upload back to back
    Unlimited,
    /// Fixed pause between files
    FixedInterval(Duration),
}

impl RateLimit {
    pub async fn pause(&self) {
        match self {
            RateLimit::Unlimited => {}
            RateLimit::FixedInterval(interval) if interval.is_zero() => {}
            RateLimit::FixedInterval(interval) => sleep(*interval).await,
        }
    }
}

impl Default for RateLimit {
    fn default() -> Self {
        RateLimit::FixedInterval(Duration::from_millis(DEFAULT_UPLOAD_INTERVAL_MS))
    }
}

/// `/repos/{owner}/{name}/contents/{path}` with each path segment escaped
fn contents_path(repo: &RepositoryRef, path: &str) -> String {
    let encoded: Vec<_> = path
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect();
    format!("{}/contents/{}", repo.api_path(), encoded.join("/"))
}

#[derive(Debug, Clone)]
pub struct FileUploader {
    api: ApiClient,
    rate_limit: RateLimit,
}

impl FileUploader {
    pub fn new(api: ApiClient, rate_limit: RateLimit) -> Self {
        Self { api, rate_limit }
    }

    /// Current version token of the file at `path`, if there is one.
    ///
    /// Best effort: any failure (usually 404) means "no file".
    pub async fn fetch_version_token(
        &self,
        credential: &Credential,
        repo: &RepositoryRef,
        path: &str,
    ) -> Option<String> {
        match self
            .api
            .request_json::<ContentFile>(
                &credential.token,
                Method::GET,
                &contents_path(repo, path),
                None,
            )
            .await
        {
            Ok(file) => Some(file.sha),
            Err(e) => {
                debug!("No existing version of {} ({})", path, e);
                None
            }
        }
    }

    /// Create or update a single file.
    ///
    /// The version token is fetched right before the write. The two calls are
    /// not atomic: a concurrent writer in between makes GitHub reject the
    /// write with a conflict, which is returned as-is.
    pub async fn upload_one(
        &self,
        credential: &Credential,
        repo: &RepositoryRef,
        path: &str,
        content: &[u8],
        message: &str,
    ) -> Result<(), RequestError> {
        let sha = self.fetch_version_token(credential, repo, path).await;

        let body = PutContentRequest {
            message: message.to_string(),
            content: BASE64.encode(content),
            sha,
        };
        let body = serde_json::to_value(&body)
            .map_err(|e| RequestError::transport(format!("Failed to encode upload: {}", e)))?;

        self.api
            .request(
                &credential.token,
                Method::PUT,
                &contents_path(repo, path),
                Some(body),
            )
            .await?;

        debug!("Uploaded {} to {}", path, repo);
        Ok(())
    }

    /// Upload files one after another.
    ///
    /// Every file is attempted; failures are collected into the report.
    /// `on_progress(completed, total, path)` runs after each file, whatever
    /// its outcome.
    pub async fn upload_many(
        &self,
        credential: &Credential,
        repo: &RepositoryRef,
        files: &[DeployableFile],
        message: &str,
        mut on_progress: impl FnMut(usize, usize, &str),
    ) -> UploadReport {
        let total = files.len();
        let mut report = UploadReport::default();

        info!("📤 Uploading {} files to {}...", total, repo);

        for (idx, file) in files.iter().enumerate() {
            if idx > 0 {
                self.rate_limit.pause().await;
            }

            match self
                .upload_one(credential, repo, &file.path, &file.content, message)
                .await
            {
                Ok(()) => report.succeeded.push(file.path.clone()),
                Err(error) => {
                    warn!("Failed to upload {}: {}", file.path, error);
                    report.failed.push(UploadFailure {
                        path: file.path.clone(),
                        error,
                    });
                }
            }

            on_progress(idx + 1, total, &file.path);
        }

        info!(
            "Upload finished: {} succeeded, {} failed",
            report.succeeded.len(),
            report.failed.len()
        );

        report
    }
}
