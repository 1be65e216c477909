use anyhow::Result;
use std::path::Path;

use crate::api::ApiClient;
use crate::command::require_credential;
use crate::registry::SiteRegistry;
use crate::session::CredentialStore;

pub async fn run_sites(api: &ApiClient, cache_dir: &Path, remote: bool) -> Result<()> {
    if remote {
        let store = CredentialStore::new(cache_dir)?;
        let credential = require_credential(api, &store).await?;
        let sites = api.list_sites(&credential).await?;

        if sites.is_empty() {
            println!("No GitHub Pages sites on {}.", credential.login);
            return Ok(());
        }

        println!("GitHub Pages sites on {}:\n", credential.login);
        for site in &sites {
            let visibility = if site.private { " (private)" } else { "" };
            println!("  {}{}", site.name, visibility);
            println!("    Site: {}", site.url);
            println!("    Repo: {}", site.repo_url);
            if let Some(updated_at) = &site.updated_at {
                println!("    Updated: {}", updated_at);
            }
        }
        return Ok(());
    }

    let sites = SiteRegistry::new(cache_dir).list()?;
    if sites.is_empty() {
        println!("No sites deployed from this machine yet.");
        println!("Run 'cloudsion deploy <dir>' to publish one.");
        return Ok(());
    }

    println!("Deployed sites:\n");
    for site in &sites {
        println!("  {}", site.name);
        println!("    Site: {}", site.url);
        println!("    Repo: {}", site.repo_url);
        println!(
            "    Last deploy: {} ({} files)",
            site.last_deploy.format("%Y-%m-%d %H:%M UTC"),
            site.file_count
        );
    }

    Ok(())
}
