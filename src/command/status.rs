use anyhow::Result;
use std::path::Path;

use crate::registry::SiteRegistry;
use crate::session::{token_from_env, CredentialStore, TOKEN_ENV};

pub async fn run_status(cache_dir: &Path) -> Result<()> {
    let store = CredentialStore::new(cache_dir)?;

    if token_from_env().is_some() {
        println!("✅ Using token from {}", TOKEN_ENV);
        println!("   (validated on each command)");
    } else if let Some(credential) = store.load()? {
        println!("✅ Logged in to GitHub");
        println!("   Account: {}", credential.login);
        println!("   Credential file: {}", store.credential_path().display());
    } else {
        println!("❌ Not logged in to GitHub");
        println!("   Run 'cloudsion login' to authenticate.");
    }

    let registry = SiteRegistry::new(cache_dir);
    println!(
        "   Deployed sites: {} ({})",
        registry.list()?.len(),
        registry.registry_path().display()
    );

    Ok(())
}
