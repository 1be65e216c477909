//! Static site deployment to GitHub Pages.
//!
//! Layers, bottom-up:
//! - `RepositoryManager`: existence check, create, delete
//! - `FileUploader`: create-or-update single files, sequential batches
//! - `PagesPublisher`: enable Pages, read Pages status
//! - `Deployer`: the phased deploy workflow on top of all three

mod orchestrator;
mod pages;
mod repository;
mod types;
mod upload;

// Re-exports
pub use orchestrator::Deployer;
pub use types::{DeployProgress, DeployProgressCallback, DeployableFile, RepositoryRef};
pub use upload::RateLimit;
