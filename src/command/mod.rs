mod delete;
mod deploy;
mod login;
mod logout;
mod preview;
mod sites;
mod status;

pub use delete::run_delete;
pub use deploy::run_deploy;
pub use login::run_login;
pub use logout::run_logout;
pub use preview::run_preview;
pub use sites::run_sites;
pub use status::run_status;

use anyhow::Result;
use std::io::{self, Write};
use tracing::debug;

use crate::api::ApiClient;
use crate::session::{token_from_env, Credential, CredentialStore, TOKEN_ENV};

/// Credential for commands that talk to GitHub.
///
/// A token in the environment wins over the stored credential and is
/// validated on every run.
pub(crate) async fn require_credential(
    api: &ApiClient,
    store: &CredentialStore,
) -> Result<Credential> {
    if let Some(token) = token_from_env() {
        debug!("Using token from {}", TOKEN_ENV);
        return Ok(api.validate_token(&token).await?);
    }

    match store.load()? {
        Some(credential) => Ok(credential),
        None => anyhow::bail!("Not logged in. Run 'cloudsion login' first."),
    }
}

/// Ask a yes/no question on stdout. `default` applies to an empty answer.
pub(crate) fn confirm(question: &str, default: bool) -> Result<bool> {
    print!("{} {}: ", question, if default { "[Y/n]" } else { "[y/N]" });
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    let answer = answer.trim().to_lowercase();

    Ok(match answer.as_str() {
        "" => default,
        "y" | "yes" => true,
        _ => false,
    })
}
