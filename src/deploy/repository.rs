//! Repository existence check, creation, metadata and deletion.

use reqwest::Method;
use tracing::{debug, info};

use crate::api::{ApiClient, CreateRepoRequest, RepositoryMetadata, RequestError};
use crate::error::DeployError;
use crate::session::Credential;

use super::types::{CreateRepoOptions, RepositoryRef};

/// Message GitHub uses when the repository name is taken
const NAME_TAKEN_MESSAGE: &str = "name already exists";

#[derive(Debug, Clone)]
pub struct RepositoryManager {
    api: ApiClient,
}

impl RepositoryManager {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Whether the repository exists.
    ///
    /// Any failure counts as "does not exist", including network errors, so a
    /// timeout here leads the caller on to a create attempt.
    pub async fn exists(&self, credential: &Credential, repo: &RepositoryRef) -> bool {
        match self.get(credential, repo).await {
            Ok(_) => true,
            Err(e) => {
                debug!("Treating {} as absent: {}", repo, e);
                false
            }
        }
    }

    /// Fetch repository metadata
    pub async fn get(
        &self,
        credential: &Credential,
        repo: &RepositoryRef,
    ) -> Result<RepositoryMetadata, RequestError> {
        self.api
            .request_json(&credential.token, Method::GET, &repo.api_path(), None)
            .await
    }

    /// Create the repository under the authenticated account.
    pub async fn create(
        &self,
        credential: &Credential,
        repo: &RepositoryRef,
        options: &CreateRepoOptions,
    ) -> Result<RepositoryMetadata, DeployError> {
        let body = CreateRepoRequest {
            name: repo.name.clone(),
            description: options.description.clone(),
            private: options.private,
            auto_init: false,
            has_issues: false,
            has_projects: false,
            has_wiki: false,
        };
        let body = serde_json::to_value(&body)
            .map_err(|e| DeployError::Validation(format!("unencodable repository request: {}", e)))?;

        match self
            .api
            .request_json(&credential.token, Method::POST, "/user/repos", Some(body))
            .await
        {
            Ok(metadata) => {
                info!("Created repository {}", repo);
                Ok(metadata)
            }
            Err(e) if e.message_contains(NAME_TAKEN_MESSAGE) => Err(DeployError::Conflict {
                name: repo.name.clone(),
            }),
            Err(e) if e.status == Some(422) => Err(DeployError::Validation(e.message)),
            Err(e) => Err(e.into()),
        }
    }

    /// Delete the repository.
    ///
    /// Deleting an already-deleted repository fails with a 404
    /// (`DeployError::is_not_found`), which callers may treat as done.
    pub async fn delete(&self, credential: &Credential, repo: &RepositoryRef) -> Result<(), DeployError> {
        self.api
            .request(&credential.token, Method::DELETE, &repo.api_path(), None)
            .await?;
        info!("Deleted repository {}", repo);
        Ok(())
    }
}
