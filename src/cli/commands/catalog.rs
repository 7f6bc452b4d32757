//! Catalog command implementation.

use crate::cli::args::OutputFormat;
use crate::core::catalog::Catalog;
use crate::Result;
use colored::Colorize;
use std::path::Path;

/// Print every row of the catalog.
pub async fn show_catalog(path: &Path, format: OutputFormat) -> Result<()> {
    if !path.exists() {
        return Err(crate::Error::PathNotFound(path.display().to_string()));
    }

    let catalog = Catalog::load(path)?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(catalog.entries())?);
        return Ok(());
    }

    println!("{} {}", "[Catalog]".bold().cyan(), path.display());
    println!();

    if catalog.is_empty() {
        println!("No entries.");
        return Ok(());
    }

    println!(
        "{:<40} {:<45} {}",
        "Original file".bold(),
        "Title".bold(),
        "URL".bold()
    );
    println!("{}", "-".repeat(120));

    for entry in catalog.entries() {
        let url = if entry.canonical_url.is_empty() {
            "(not found)".yellow().to_string()
        } else {
            entry.canonical_url.clone()
        };
        println!(
            "{:<40} {:<45} {}",
            truncate(&entry.original_filename, 38),
            truncate(&entry.display_title, 43),
            url
        );
    }

    println!();
    println!("Total: {}", catalog.len());

    Ok(())
}

/// Truncate to `max` characters, marking the cut.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
