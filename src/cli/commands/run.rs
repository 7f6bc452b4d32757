//! Run command implementation.
//!
//! Loads the catalog, runs the pipeline over the source directory and prints
//! a summary.

use crate::core::catalog::Catalog;
use crate::core::pipeline::{Pipeline, RunSummary};
use crate::models::config::Config;
use crate::Result;
use chrono::Local;
use colored::Colorize;
use std::path::Path;

/// Execute the run command.
pub async fn run(config: &Config) -> Result<RunSummary> {
    let started = Local::now();
    println!("{}", "[RUN] Organizing videos...".bold().cyan());
    println!();
    println!("  {} {}", "Started:".bold(), started.format("%Y-%m-%d %H:%M:%S"));
    println!("  {} {}", "Source:".bold(), config.paths.source_dir.display());
    println!("  {} {}", "Target:".bold(), config.paths.target_dir.display());
    println!("  {} {}", "Catalog:".bold(), config.paths.catalog_path.display());
    println!();

    if !config.paths.source_dir.exists() {
        println!(
            "{} {}",
            "[WARNING] Source directory does not exist:".bold().yellow(),
            config.paths.source_dir.display()
        );
    }

    let mut catalog = Catalog::load(&config.paths.catalog_path)?;
    println!("[INFO] Catalog has {} entries", catalog.len());

    let pipeline = Pipeline::new(config)?;
    let summary = pipeline.run(&mut catalog).await?;

    let elapsed = Local::now() - started;
    print_summary(&summary, elapsed.num_seconds());

    Ok(summary)
}

/// Print the end-of-run report.
fn print_summary(summary: &RunSummary, elapsed_secs: i64) {
    println!();
    println!("{}", "=== Done ===".bold().green());
    println!("  {} {}", "Videos found:".bold(), summary.discovered);
    println!("  {} {}", "Newly processed:".bold(), summary.processed);
    println!(
        "  {} {} found, {} not found, {} covers saved",
        "Lookups:".bold(),
        summary.found,
        summary.not_found,
        summary.covers_downloaded
    );
    println!("  {} {}", "Skipped (already cataloged):".bold(), summary.skipped);
    if summary.failed > 0 {
        println!("  {} {}", "Failed:".bold().red(), summary.failed);
    }
    println!("  {} {}", "Total in catalog:".bold(), summary.total_cataloged);
    println!("  {} {}", "Catalog:".bold(), display_absolute(&summary.catalog_path));
    println!("  {} {}", "Organized into:".bold(), display_absolute(&summary.target_dir));
    println!("  {} {}s", "Elapsed:".bold(), elapsed_secs);
}

fn display_absolute(path: &Path) -> String {
    std::fs::canonicalize(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}
