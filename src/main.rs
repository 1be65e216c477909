use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod api;
mod cli;
mod command;
mod config;
mod deploy;
mod error;
mod registry;
mod session;
mod site;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let Some(cmd) = cli.command else {
        // No command specified, show help
        eprintln!("No command specified. Use --help for usage information.");
        eprintln!("Use 'cloudsion login' to authenticate or 'cloudsion deploy <dir>' to publish a site.");
        return Ok(());
    };

    let cache_dir = config::resolve_cache_dir(cli.cache_dir)?;
    let api = api::ApiClient::new(&cli.api_url)?;

    match cmd {
        Commands::Login { token } => command::run_login(&api, &cache_dir, token).await,
        Commands::Logout => command::run_logout(&cache_dir).await,
        Commands::Status => command::run_status(&cache_dir).await,
        Commands::Deploy(args) => command::run_deploy(&api, &cache_dir, args).await,
        Commands::Sites { remote } => command::run_sites(&api, &cache_dir, remote).await,
        Commands::Delete { name, yes } => command::run_delete(&api, &cache_dir, name, yes).await,
        Commands::Preview { dir, all } => command::run_preview(dir, all).await,
    }
}
