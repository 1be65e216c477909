use anyhow::Result;
use std::path::Path;

use crate::api::ApiClient;
use crate::command::{confirm, require_credential};
use crate::config::DeployConfig;
use crate::deploy::{Deployer, RepositoryRef};
use crate::registry::SiteRegistry;
use crate::session::CredentialStore;

pub async fn run_delete(api: &ApiClient, cache_dir: &Path, name: String, yes: bool) -> Result<()> {
    let store = CredentialStore::new(cache_dir)?;
    let credential = require_credential(api, &store).await?;
    let repo = RepositoryRef::for_site(&credential.login, &name);
    let deployer = Deployer::new(
        api.clone(),
        SiteRegistry::new(cache_dir),
        DeployConfig::default(),
    );

    match deployer.repositories().get(&credential, &repo).await {
        Ok(metadata) => {
            println!("Repository: {} ({})", metadata.full_name, metadata.html_url);
            if metadata.has_pages {
                println!("   Its GitHub Pages site will go offline.");
            }
        }
        Err(e) if e.is_not_found() => {
            println!("Repository {} no longer exists on GitHub.", repo);
        }
        Err(e) => return Err(e.into()),
    }

    if !yes && !confirm("Permanently delete it and forget the site?", false)? {
        println!("Delete cancelled.");
        return Ok(());
    }

    deployer.delete_site(&credential, &name).await?;

    println!("✅ Deleted {}", repo);

    Ok(())
}
