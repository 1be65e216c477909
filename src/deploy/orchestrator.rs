//! Deploy orchestration.
//!
//! Runs one deploy as a fixed sequence of phases:
//! 1. checking: does the repository exist?
//! 2. creating: only when it does not, followed by a settle delay
//! 3. uploading: every file, sequentially; failures are recorded, not fatal
//! 4. enabling: turn on GitHub Pages
//! 5. finalizing: short delay, compute the site URL, update the site registry
//! 6. done: one last event at 100% carrying the site URL
//!
//! Errors in checking, creating or enabling abort the deploy before anything
//! is written to the registry.

use std::collections::HashMap;

use chrono::Utc;
use tokio::time::sleep;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::api::ApiClient;
use crate::config::DeployConfig;
use crate::error::DeployError;
use crate::registry::{DeployRecord, SiteRegistry};
use crate::session::Credential;

use super::pages::PagesPublisher;
use super::repository::RepositoryManager;
use super::types::{
    CreateRepoOptions, DeployOutcome, DeployProgress, DeployProgressCallback, DeployableFile,
    Phase, RepositoryRef,
};
use super::upload::FileUploader;

/// Collapse duplicate paths: the last occurrence's content wins and takes the
/// position of the first occurrence.
pub fn dedupe_files(files: Vec<DeployableFile>) -> Vec<DeployableFile> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<DeployableFile> = Vec::with_capacity(files.len());

    for file in files {
        match positions.get(&file.path) {
            Some(&idx) => {
                debug!("Duplicate path {}, keeping the later file", file.path);
                unique[idx] = file;
            }
            None => {
                positions.insert(file.path.clone(), unique.len());
                unique.push(file);
            }
        }
    }

    unique
}

/// Sequences repository, upload and Pages operations into a deploy.
#[derive(Debug, Clone)]
pub struct Deployer {
    repositories: RepositoryManager,
    uploader: FileUploader,
    publisher: PagesPublisher,
    registry: SiteRegistry,
    config: DeployConfig,
}

impl Deployer {
    pub fn new(api: ApiClient, registry: SiteRegistry, config: DeployConfig) -> Self {
        Self {
            repositories: RepositoryManager::new(api.clone()),
            uploader: FileUploader::new(api.clone(), config.rate_limit),
            publisher: PagesPublisher::new(api, config.timings.pages),
            registry,
            config,
        }
    }

    pub fn repositories(&self) -> &RepositoryManager {
        &self.repositories
    }

    pub fn registry(&self) -> &SiteRegistry {
        &self.registry
    }

    fn validate(repo: &RepositoryRef, files: &[DeployableFile]) -> Result<(), DeployError> {
        if repo.name.trim_matches('-').is_empty() {
            return Err(DeployError::Validation(
                "site name must contain at least one letter or digit".to_string(),
            ));
        }
        if files.is_empty() {
            return Err(DeployError::Validation("no files to deploy".to_string()));
        }
        if let Some(file) = files.iter().find(|f| !f.has_valid_path()) {
            return Err(DeployError::Validation(format!(
                "invalid file path: {:?}",
                file.path
            )));
        }
        Ok(())
    }

    /// Deploy `files` as the site `site_name` under the credential's account.
    ///
    /// The site name is sanitized into a repository name first. The returned
    /// outcome has `success == false` when any file failed to upload; Pages is
    /// still enabled and the registry still updated in that case.
    pub async fn deploy(
        &self,
        credential: &Credential,
        site_name: &str,
        files: Vec<DeployableFile>,
        progress: &dyn DeployProgressCallback,
    ) -> Result<DeployOutcome, DeployError> {
        let repo = RepositoryRef::for_site(&credential.login, site_name);
        Self::validate(&repo, &files)?;
        let files = dedupe_files(files);

        let deploy_id = Uuid::new_v4();
        info!(
            "🚀 Deploy {} started: {} files to {}",
            deploy_id,
            files.len(),
            repo
        );

        progress.on_progress(&DeployProgress::new(Phase::Checking));
        let exists = self.repositories.exists(credential, &repo).await;

        let created = if exists {
            debug!("Repository {} already exists, skipping creation", repo);
            false
        } else {
            progress.on_progress(&DeployProgress::new(Phase::Creating));
            let options = CreateRepoOptions {
                description: self.config.description.clone(),
                private: self.config.private,
            };
            self.repositories.create(credential, &repo, &options).await?;
            if !self.config.timings.repo_settle.is_zero() {
                sleep(self.config.timings.repo_settle).await;
            }
            true
        };

        progress.on_progress(&DeployProgress::new(Phase::Uploading));
        let report = self
            .uploader
            .upload_many(
                credential,
                &repo,
                &files,
                &self.config.commit_message,
                |completed, total, path| {
                    progress.on_progress(&DeployProgress::with_detail(
                        Phase::Uploading,
                        format!("{}/{} files - {}", completed, total, path),
                    ));
                },
            )
            .await;

        if !report.is_complete() {
            warn!(
                "{} of {} files failed to upload; continuing with Pages",
                report.failed.len(),
                files.len()
            );
        }

        progress.on_progress(&DeployProgress::new(Phase::Enabling));
        let pages = self
            .publisher
            .enable(credential, &repo, &self.config.branch)
            .await?;

        progress.on_progress(&DeployProgress::new(Phase::Finalizing));
        if !self.config.timings.finalize.is_zero() {
            sleep(self.config.timings.finalize).await;
        }

        let site_url = repo.pages_url();
        let repo_url = repo.html_url();

        self.registry
            .record(DeployRecord {
                name: repo.name.clone(),
                owner: repo.owner.clone(),
                url: site_url.clone(),
                repo_url: repo_url.clone(),
                file_count: files.len(),
                last_deploy: Utc::now(),
            })
            .map_err(DeployError::Registry)?;

        let success = report.is_complete();
        info!(
            "{} Deploy {} finished: {} ({} uploaded, {} failed)",
            if success { "✅" } else { "⚠️" },
            deploy_id,
            site_url,
            report.succeeded.len(),
            report.failed.len()
        );
        progress.on_progress(&DeployProgress::with_detail(Phase::Done, site_url.clone()));

        Ok(DeployOutcome {
            success,
            site_url,
            repo,
            repo_url,
            created,
            files_uploaded: report.succeeded.len(),
            failures: report.failed,
            pages,
        })
    }

    /// Delete the site's repository and forget it locally.
    ///
    /// A repository that is already gone (404) still clears the registry
    /// entry.
    pub async fn delete_site(&self, credential: &Credential, site_name: &str) -> Result<(), DeployError> {
        let repo = RepositoryRef::for_site(&credential.login, site_name);

        match self.repositories.delete(credential, &repo).await {
            Ok(()) => {}
            Err(e) if e.is_not_found() => {
                warn!("Repository {} was already deleted", repo);
            }
            Err(e) => return Err(e),
        }

        self.registry
            .remove(&repo.name)
            .map_err(DeployError::Registry)?;
        Ok(())
    }
}
