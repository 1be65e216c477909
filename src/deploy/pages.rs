//! GitHub Pages enablement and status.

use std::time::Duration;

use reqwest::Method;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::api::{ApiClient, EnablePagesRequest, PagesInfo, PagesSource, RequestError};
use crate::session::Credential;

use super::types::{PagesStatus, PublishResult, RepositoryRef};

/// Message GitHub returns when Pages is already on for the repository
const ALREADY_ENABLED_MESSAGE: &str = "already enabled";

#[derive(Debug, Clone)]
pub struct PagesPublisher {
    api: ApiClient,
    /// Wait after the enable call before reading status
    delay: Duration,
}

impl PagesPublisher {
    pub fn new(api: ApiClient, delay: Duration) -> Self {
        Self { api, delay }
    }

    fn pages_path(repo: &RepositoryRef) -> String {
        format!("{}/pages", repo.api_path())
    }

    async fn wait(&self) {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
    }

    /// Read the Pages status. A repository without Pages (or any failure to
    /// read the status) is `Disabled`, not an error.
    pub async fn status(&self, credential: &Credential, repo: &RepositoryRef) -> PagesStatus {
        match self
            .api
            .request_json::<PagesInfo>(&credential.token, Method::GET, &Self::pages_path(repo), None)
            .await
        {
            Ok(info) => PagesStatus::Enabled {
                url: info.html_url,
                build_status: info.status,
            },
            Err(e) => {
                debug!("Pages not enabled for {}: {}", repo, e);
                PagesStatus::Disabled
            }
        }
    }

    /// Turn Pages on for `branch` at the repository root.
    ///
    /// "Already enabled" counts as success. Any other failure gets one
    /// status re-check after the delay, because GitHub sometimes rejects the
    /// enable request while still activating Pages in the background.
    pub async fn enable(
        &self,
        credential: &Credential,
        repo: &RepositoryRef,
        branch: &str,
    ) -> Result<PublishResult, RequestError> {
        let body = EnablePagesRequest {
            source: PagesSource {
                branch: branch.to_string(),
                path: "/".to_string(),
            },
        };
        let body = serde_json::to_value(&body)
            .map_err(|e| RequestError::transport(format!("Failed to encode Pages request: {}", e)))?;

        match self
            .api
            .request(&credential.token, Method::POST, &Self::pages_path(repo), Some(body))
            .await
        {
            Ok(_) => {
                info!("🌐 Enabled GitHub Pages for {} ({})", repo, branch);
                self.wait().await;
                let status = self.status(credential, repo).await;
                Ok(PublishResult::from_status(status, false))
            }
            Err(e) if e.is_conflict() || e.message_contains(ALREADY_ENABLED_MESSAGE) => {
                debug!("Pages already enabled for {}", repo);
                let status = self.status(credential, repo).await;
                Ok(PublishResult::from_status(status, true))
            }
            Err(e) => {
                warn!("Enabling Pages for {} failed ({}); re-checking status", repo, e);
                self.wait().await;
                let status = self.status(credential, repo).await;
                if status.is_enabled() {
                    info!("Pages came up for {} despite the error", repo);
                    Ok(PublishResult::from_status(status, false))
                } else {
                    Err(e)
                }
            }
        }
    }
}
