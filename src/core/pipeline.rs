//! Pipeline driver.
//!
//! For every video found in the source directory:
//! organize → search Bilibili → download cover → append catalog row.
//!
//! Files are handled one at a time. A file that cannot be moved is skipped;
//! a catalog that cannot be written stops the run.

use crate::core::catalog::Catalog;
use crate::core::organizer::{OrganizeOutcome, OrganizedVideo, Organizer};
use crate::core::scanner;
use crate::models::config::Config;
use crate::models::media::{CatalogEntry, VideoFile, VideoMetadata};
use crate::services::bilibili::BilibiliClient;
use crate::services::cover::CoverDownloader;
use crate::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// What ended up in the cover column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverState {
    /// Saved next to the video; the row holds the local path.
    Downloaded,
    /// Download failed; the row holds the remote URL.
    RemoteOnly,
    /// No cover URL to begin with.
    None,
}

/// Final state of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Already in the catalog.
    Skipped,
    /// Could not be moved into its folder.
    Failed(String),
    /// Moved and recorded.
    Cataloged { found: bool, cover: CoverState },
}

/// Counters reported after a run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub discovered: usize,
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
    pub found: usize,
    pub not_found: usize,
    pub covers_downloaded: usize,
    /// Rows in the catalog after the run.
    pub total_cataloged: usize,
    pub catalog_path: PathBuf,
    pub target_dir: PathBuf,
}

impl RunSummary {
    fn record(&mut self, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::Skipped => self.skipped += 1,
            FileOutcome::Failed(_) => self.failed += 1,
            FileOutcome::Cataloged { found, cover } => {
                self.processed += 1;
                if *found {
                    self.found += 1;
                } else {
                    self.not_found += 1;
                }
                if *cover == CoverState::Downloaded {
                    self.covers_downloaded += 1;
                }
            }
        }
    }
}

/// Runs the organize-and-catalog pass.
pub struct Pipeline {
    source_dir: PathBuf,
    request_delay: Duration,
    organizer: Organizer,
    bilibili: BilibiliClient,
    covers: CoverDownloader,
}

impl Pipeline {
    /// Build a pipeline from configuration.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            source_dir: config.paths.source_dir.clone(),
            request_delay: Duration::from_millis(config.pipeline.request_delay_ms),
            organizer: Organizer::new(&config.paths.target_dir),
            bilibili: BilibiliClient::new(config.bilibili.clone())?,
            covers: CoverDownloader::new(config.bilibili.timeout, &config.bilibili.user_agent)?,
        })
    }

    /// Process every video under the source directory.
    ///
    /// A missing source directory is logged and treated as empty. Failing to
    /// create the target root or to write the catalog is returned as an error.
    pub async fn run(&self, catalog: &mut Catalog) -> Result<RunSummary> {
        let target_dir = self.organizer.target_dir();
        std::fs::create_dir_all(target_dir)?;

        let mut summary = RunSummary {
            catalog_path: catalog.path().to_path_buf(),
            target_dir: target_dir.to_path_buf(),
            ..Default::default()
        };

        let videos = self.discover(target_dir);
        summary.discovered = videos.len();
        tracing::info!("Found {} video files", videos.len());

        let pb = ProgressBar::new(videos.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );

        for (idx, video) in videos.iter().enumerate() {
            pb.set_message(video.filename.clone());
            tracing::info!("Processing [{}/{}]: {}", idx + 1, videos.len(), video.filename);

            let outcome = match self.process_file(video, catalog).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    pb.abandon();
                    return Err(e);
                }
            };
            summary.record(&outcome);
            pb.inc(1);

            if let FileOutcome::Cataloged { .. } = outcome {
                if !self.request_delay.is_zero() {
                    tokio::time::sleep(self.request_delay).await;
                }
            }
        }

        pb.finish_and_clear();
        summary.total_cataloged = catalog.len();
        Ok(summary)
    }

    /// Take one file through every step.
    ///
    /// Only a catalog write failure is returned as `Err`.
    pub async fn process_file(&self, file: &VideoFile, catalog: &mut Catalog) -> Result<FileOutcome> {
        let organized = match self.organizer.organize(file, catalog) {
            Ok(OrganizeOutcome::Skipped) => return Ok(FileOutcome::Skipped),
            Ok(OrganizeOutcome::Organized(organized)) => organized,
            Err(e) => {
                tracing::error!("Failed to organize {}: {}", file.filename, e);
                return Ok(FileOutcome::Failed(e.to_string()));
            }
        };

        tracing::info!("Searching: {}", organized.folder_name);
        let (entry, outcome) = match self.bilibili.search(&organized.folder_name).await {
            Some(metadata) => self.found_entry(file, &organized, metadata).await,
            None => (
                CatalogEntry::fallback(&organized.folder_name, &file.filename),
                FileOutcome::Cataloged {
                    found: false,
                    cover: CoverState::None,
                },
            ),
        };

        catalog.append(entry)?;
        tracing::info!("Cataloged: {}", file.filename);

        Ok(outcome)
    }

    async fn found_entry(
        &self,
        file: &VideoFile,
        organized: &OrganizedVideo,
        metadata: VideoMetadata,
    ) -> (CatalogEntry, FileOutcome) {
        let local_cover = self
            .covers
            .download(&metadata.cover_url, &organized.video_dir, &file.filename)
            .await;

        let (cover_reference, cover) = match local_cover {
            Some(path) => (path.display().to_string(), CoverState::Downloaded),
            None if metadata.cover_url.is_empty() => (String::new(), CoverState::None),
            None => (metadata.cover_url.clone(), CoverState::RemoteOnly),
        };

        let display_title = if metadata.title.is_empty() {
            organized.folder_name.clone()
        } else {
            metadata.title
        };

        let entry = CatalogEntry {
            display_title,
            canonical_url: metadata.canonical_url,
            cover_reference,
            original_filename: file.filename.clone(),
        };

        (entry, FileOutcome::Cataloged { found: true, cover })
    }

    /// Scan the source directory, leaving out the target tree if it is nested inside.
    ///
    /// When target and source are the same directory nothing is excluded: the
    /// file list is collected before anything moves, and files organized on an
    /// earlier run are skipped through the catalog.
    fn discover(&self, target_dir: &Path) -> Vec<VideoFile> {
        let source = self
            .source_dir
            .canonicalize()
            .unwrap_or_else(|_| self.source_dir.clone());
        let excluded = target_dir
            .canonicalize()
            .ok()
            .filter(|t| t.starts_with(&source) && *t != source);

        if let Some(ref ex) = excluded {
            tracing::debug!("Target {} is inside the source, excluding it", ex.display());
        }

        match scanner::scan_directory_excluding(&source, excluded.as_deref()) {
            Ok(videos) => videos,
            Err(e) => {
                tracing::error!("Source directory unavailable: {}", e);
                Vec::new()
            }
        }
    }
}
