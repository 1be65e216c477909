use anyhow::Result;
use std::io::{self, Write};
use std::path::Path;

use crate::api::ApiClient;
use crate::command::confirm;
use crate::session::CredentialStore;

pub async fn run_login(api: &ApiClient, cache_dir: &Path, token: Option<String>) -> Result<()> {
    let store = CredentialStore::new(cache_dir)?;

    let token = match token {
        // An explicit token replaces the stored one without asking
        Some(token) => {
            if store.is_logged_in() {
                println!("Replacing the stored GitHub credential.");
            }
            token
        }
        None => {
            if store.is_logged_in() {
                println!("⚠️  You are already logged in to GitHub.");
                if !confirm("Replace the stored token?", false)? {
                    println!("Login cancelled. Your existing credential remains active.");
                    return Ok(());
                }
            }

            println!("Create a personal access token with the `repo` scope at");
            println!("https://github.com/settings/tokens\n");
            print!("Paste the token here: ");
            io::stdout().flush()?;

            let mut pasted = String::new();
            io::stdin().read_line(&mut pasted)?;
            pasted.trim().to_string()
        }
    };

    println!("🔐 Validating token...");
    let credential = api.validate_token(&token).await?;
    store.save(&credential)?;

    println!("\n✅ Logged in to GitHub as {}", credential.login);

    Ok(())
}
