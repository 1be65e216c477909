//! Account endpoints: credential validation and the sites dashboard listing.

use reqwest::Method;
use tracing::debug;

use super::client::ApiClient;
use super::types::{GitHubUser, RepositoryMetadata, RequestError, SiteSummary};
use crate::deploy::RepositoryRef;
use crate::error::DeployError;
use crate::session::Credential;

/// Listing endpoint used by the dashboard (most recently updated first)
const LIST_REPOS_PATH: &str = "/user/repos?per_page=100&sort=updated";

impl ApiClient {
    /// Validate a token with `GET /user` and resolve the account login.
    ///
    /// Any failure (bad or expired token, missing login in the response,
    /// network error) is reported as a credential error.
    pub async fn validate_token(&self, token: &str) -> Result<Credential, DeployError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(DeployError::Credential("token is empty".to_string()));
        }

        debug!("=== Token Validation ===");
        let user: GitHubUser = self
            .request_json(token, Method::GET, "/user", None)
            .await
            .map_err(|e| DeployError::Credential(e.message))?;

        if user.login.is_empty() {
            return Err(DeployError::Credential(
                "GitHub did not return an account login".to_string(),
            ));
        }

        debug!("Token belongs to {}", user.login);
        Ok(Credential {
            token: token.to_string(),
            login: user.login,
        })
    }

    /// List the account's repositories that have Pages enabled.
    pub async fn list_sites(&self, credential: &Credential) -> Result<Vec<SiteSummary>, RequestError> {
        let repos: Vec<RepositoryMetadata> = self
            .request_json(&credential.token, Method::GET, LIST_REPOS_PATH, None)
            .await?;

        Ok(repos
            .into_iter()
            .filter(|repo| repo.has_pages)
            .map(|repo| {
                let site = RepositoryRef {
                    owner: repo.owner.login.clone(),
                    name: repo.name.clone(),
                };
                SiteSummary {
                    url: site.pages_url(),
                    repo_url: if repo.html_url.is_empty() {
                        site.html_url()
                    } else {
                        repo.html_url
                    },
                    name: repo.name,
                    private: repo.private,
                    updated_at: repo.updated_at,
                }
            })
            .collect())
    }
}
