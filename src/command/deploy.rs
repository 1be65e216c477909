use anyhow::{Context, Result};
use std::path::Path;

use crate::api::ApiClient;
use crate::cli::{self, DeployArgs};
use crate::command::require_credential;
use crate::config::DeployConfig;
use crate::deploy::{DeployProgress, DeployProgressCallback, Deployer, RepositoryRef};
use crate::registry::SiteRegistry;
use crate::session::CredentialStore;
use crate::site::{format_size, scan_site};

/// Prints one line per progress event: `[ 30%] Uploading files... (1/3 files - index.html)`
struct ConsoleProgress;

impl DeployProgressCallback for ConsoleProgress {
    fn on_progress(&self, progress: &DeployProgress) {
        match &progress.detail {
            Some(detail) => println!(
                "[{:>3}%] {} ({})",
                progress.phase.percent(),
                progress.message,
                detail
            ),
            None => println!("[{:>3}%] {}", progress.phase.percent(), progress.message),
        }
    }
}

pub async fn run_deploy(api: &ApiClient, cache_dir: &Path, args: DeployArgs) -> Result<()> {
    let root_path = cli::resolve_site_dir(&args.dir)?;
    let site_name = match args.name {
        Some(name) => name,
        None => cli::default_site_name(&root_path)
            .context("Could not derive a site name from the directory; pass --name")?,
    };

    let store = CredentialStore::new(cache_dir)?;
    let credential = require_credential(api, &store).await?;

    let config = DeployConfig {
        branch: args.branch,
        commit_message: args.message,
        description: args.description,
        private: args.private,
        ..DeployConfig::default()
    };
    let deployer = Deployer::new(api.clone(), SiteRegistry::new(cache_dir), config);

    let repo = RepositoryRef::for_site(&credential.login, &site_name);
    if let Some(previous) = deployer.registry().get(&repo.name)? {
        println!(
            "↻ Redeploying {} (last deploy {}, {} files)",
            previous.name,
            previous.last_deploy.format("%Y-%m-%d %H:%M UTC"),
            previous.file_count
        );
    }

    let files = scan_site(&root_path)?;
    let total_bytes: u64 = files.iter().map(|f| f.size).sum();
    println!(
        "🚀 Deploying {} ({} files, {}) as {}\n",
        root_path.display(),
        files.len(),
        format_size(total_bytes),
        site_name
    );

    let outcome = deployer
        .deploy(&credential, &site_name, files, &ConsoleProgress)
        .await?;

    println!();
    if outcome.created {
        println!("📦 Created repository {}", outcome.repo_url);
    }
    if outcome.pages.already_enabled {
        println!("🌐 GitHub Pages was already enabled");
    }
    if let Some(build_status) = &outcome.pages.build_status {
        println!("🔨 Pages build status: {}", build_status);
    }

    if !outcome.success {
        println!(
            "⚠️  {} file(s) failed to upload:",
            outcome.failures.len()
        );
        for failure in &outcome.failures {
            println!("    - {}: {}", failure.path, failure.error);
        }
        println!("\n   Site: {}", outcome.site_url);
        anyhow::bail!(
            "Deploy incomplete: {} of {} files uploaded",
            outcome.files_uploaded,
            outcome.files_uploaded + outcome.failures.len()
        );
    }

    println!("✅ Deployed {} files to {}", outcome.files_uploaded, outcome.repo);
    println!("   Site: {}", outcome.site_url);
    println!("   Repo: {}", outcome.repo_url);
    println!("   (GitHub Pages may take a minute to publish the first build)");

    if args.open {
        println!("🌐 Opening site in your browser...");
        if open::that(&outcome.site_url).is_err() {
            println!("⚠️  Could not open browser automatically.");
        }
    }

    Ok(())
}
