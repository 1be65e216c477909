use anyhow::Result;

use crate::cli;
use crate::site::{format_size, scan_site};

pub async fn run_preview(dir: String, all: bool) -> Result<()> {
    let root_path = cli::resolve_site_dir(&dir)?;

    println!("Scanning site: {}\n", root_path.display());

    let files = scan_site(&root_path)?;
    let total_bytes: u64 = files.iter().map(|f| f.size).sum();

    println!("Summary:");
    println!("  Files to upload: {}", files.len());
    println!("  Total size: {}", format_size(total_bytes));

    if !files.iter().any(|f| f.path == "index.html") {
        println!("\n⚠️  Warning: no index.html at the site root.");
        println!("  GitHub Pages will not serve a home page without one.");
    }

    if all {
        println!("\nFiles:");
        for file in &files {
            println!("  {:>12}  {}", format_size(file.size), file.path);
        }
    } else if !files.is_empty() {
        println!("\n  Use --all to see all files");
    }

    Ok(())
}
