//! Check command implementation.

use crate::models::config::Config;
use crate::preflight;
use crate::Result;
use colored::Colorize;

/// Run the preflight checks and report whether all of them passed.
pub async fn check(config: &Config) -> Result<bool> {
    println!("{}", "Running preflight checks...".bold());
    println!();

    let results = preflight::run_preflight_checks(config).await?;
    preflight::print_results(&results);
    println!();

    Ok(preflight::all_passed(&results))
}
