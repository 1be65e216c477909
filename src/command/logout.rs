use anyhow::Result;
use std::path::Path;

use crate::session::CredentialStore;

pub async fn run_logout(cache_dir: &Path) -> Result<()> {
    let store = CredentialStore::new(cache_dir)?;

    if !store.is_logged_in() {
        println!("You are not logged in.");
        return Ok(());
    }

    store.remove()?;
    println!("✅ Successfully logged out. The token was removed from this machine.");

    Ok(())
}
