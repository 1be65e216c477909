//! Local site directories.

mod scanner;

pub use scanner::{format_size, scan_site};
