mod args;
mod paths;

pub use args::{Cli, Commands, DeployArgs};
pub use paths::{default_site_name, resolve_site_dir};
