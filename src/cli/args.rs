use clap::{Args, Parser, Subcommand};

use crate::api::DEFAULT_API_URL;
use crate::config::{DEFAULT_BRANCH, DEFAULT_COMMIT_MESSAGE, DEFAULT_DESCRIPTION};

/// Cloudsion CLI - publish a static site to GitHub Pages
#[derive(Parser)]
#[command(name = "cloudsion")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// GitHub API base URL
    #[arg(long, global = true, env = "CLOUDSION_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Directory to store Cloudsion state (credential, site registry). Defaults to ~/.cloudsion
    #[arg(long, global = true)]
    pub cache_dir: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a GitHub personal access token and store it
    Login {
        /// Token with `repo` scope (prompted for when absent)
        #[arg(long)]
        token: Option<String>,
    },
    /// Forget the stored token
    Logout,
    /// Show the current credential
    Status,
    /// Deploy a local directory to GitHub Pages
    Deploy(DeployArgs),
    /// List the files a deploy would upload (dry-run)
    Preview {
        /// Site directory
        dir: String,

        /// Show all files (not just summary)
        #[arg(short, long)]
        all: bool,
    },
    /// List deployed sites
    Sites {
        /// Query GitHub instead of the local registry
        #[arg(long)]
        remote: bool,
    },
    /// Delete a site's repository and forget it locally
    Delete {
        /// Site name
        name: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Args)]
pub struct DeployArgs {
    /// Site directory
    pub dir: String,

    /// Site name, used as the repository name. Defaults to the directory name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Branch GitHub Pages serves from
    #[arg(long, default_value = DEFAULT_BRANCH)]
    pub branch: String,

    /// Commit message for uploaded files
    #[arg(short, long, default_value = DEFAULT_COMMIT_MESSAGE)]
    pub message: String,

    /// Description for a newly created repository
    #[arg(long, default_value = DEFAULT_DESCRIPTION)]
    pub description: String,

    /// Create the repository as private
    #[arg(long)]
    pub private: bool,

    /// Open the site in a browser when the deploy finishes
    #[arg(long)]
    pub open: bool,
}
