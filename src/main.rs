//! Video Cataloger CLI
//!
//! Organizes downloaded video files into per-video folders and catalogs them
//! with metadata from Bilibili.

use clap::Parser;
use video_cataloger::cli::{
    args::{Cli, Commands},
    commands::{catalog, check, run},
};
use video_cataloger::models::config::{self, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    let mut config = config::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Run {
            source,
            target,
            catalog,
            delay_ms,
        } => {
            apply_overrides(&mut config, source, target, catalog, delay_ms);
            run::run(&config).await?;
        }

        Commands::Catalog { catalog: path, format } => {
            let path = path.unwrap_or_else(|| config.paths.catalog_path.clone());
            catalog::show_catalog(&path, format).await?;
        }

        Commands::Check => {
            if !check::check(&config).await? {
                anyhow::bail!("Preflight checks failed. Fix the issues above and try again.");
            }
        }
    }

    Ok(())
}

/// Apply command line overrides on top of the loaded configuration.
fn apply_overrides(
    config: &mut Config,
    source: Option<std::path::PathBuf>,
    target: Option<std::path::PathBuf>,
    catalog: Option<std::path::PathBuf>,
    delay_ms: Option<u64>,
) {
    if let Some(source) = source {
        config.paths.source_dir = source;
    }
    if let Some(target) = target {
        config.paths.target_dir = target;
    }
    if let Some(catalog) = catalog {
        config.paths.catalog_path = catalog;
    }
    if let Some(delay_ms) = delay_ms {
        config.pipeline.request_delay_ms = delay_ms;
    }
}

/// Initialize the logging system.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("video_cataloger=debug")
    } else {
        EnvFilter::new("video_cataloger=info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}
