//! Directory organizer.
//!
//! Gives every video its own folder under the target root:
//!
//! ```text
//! <target>/<folder>/cut_video/<original file>
//! <target>/<folder>/original_video/
//! ```

use crate::core::catalog::Catalog;
use crate::generators::folder::sanitize_folder_name;
use crate::models::media::VideoFile;
use crate::utils::fs::move_file;
use crate::Result;
use std::path::{Path, PathBuf};

/// Subfolder that receives the downloaded file.
pub const CUT_VIDEO_DIR: &str = "cut_video";

/// Subfolder left empty for the untouched source.
pub const ORIGINAL_VIDEO_DIR: &str = "original_video";

/// A video that has been moved into its folder.
#[derive(Debug, Clone)]
pub struct OrganizedVideo {
    /// `<target>/<folder>`.
    pub video_dir: PathBuf,
    /// Sanitized folder name, also used as the search keyword.
    pub folder_name: String,
    /// Final location of the file.
    pub moved_to: PathBuf,
}

/// Result of organizing one file.
#[derive(Debug, Clone)]
pub enum OrganizeOutcome {
    /// Already in the catalog; nothing was touched.
    Skipped,
    Organized(OrganizedVideo),
}

/// Creates per-video folders under a target root.
#[derive(Debug, Clone)]
pub struct Organizer {
    target_dir: PathBuf,
}

impl Organizer {
    pub fn new(target_dir: &Path) -> Self {
        Self {
            target_dir: target_dir.to_path_buf(),
        }
    }

    pub fn target_dir(&self) -> &Path {
        &self.target_dir
    }

    /// Folder that a file would be placed in.
    pub fn video_dir_for(&self, file: &VideoFile) -> (PathBuf, String) {
        let folder_name = sanitize_folder_name(&file.filename);
        (self.target_dir.join(&folder_name), folder_name)
    }

    /// Move `file` into its folder unless the catalog already lists it.
    ///
    /// Two files that sanitize to the same folder name share that folder. An
    /// existing file in `cut_video` is never overwritten.
    pub fn organize(&self, file: &VideoFile, catalog: &Catalog) -> Result<OrganizeOutcome> {
        if catalog.contains(&file.filename) {
            tracing::info!("Already processed, skipping: {}", file.filename);
            return Ok(OrganizeOutcome::Skipped);
        }

        let (video_dir, folder_name) = self.video_dir_for(file);
        if video_dir.exists() {
            tracing::warn!(
                "Folder {} already exists, {} will share it",
                video_dir.display(),
                file.filename
            );
        }

        let cut_video_dir = video_dir.join(CUT_VIDEO_DIR);
        let original_video_dir = video_dir.join(ORIGINAL_VIDEO_DIR);
        std::fs::create_dir_all(&cut_video_dir)?;
        std::fs::create_dir_all(&original_video_dir)?;

        let moved_to = cut_video_dir.join(&file.filename);
        if moved_to.exists() {
            return Err(crate::Error::FileAlreadyExists(moved_to.display().to_string()));
        }

        move_file(&file.path, &moved_to).map_err(|e| {
            crate::Error::FileMove(format!(
                "{} -> {}: {}",
                file.path.display(),
                moved_to.display(),
                e
            ))
        })?;

        tracing::info!("Moved {} to {}", file.filename, moved_to.display());

        Ok(OrganizeOutcome::Organized(OrganizedVideo {
            video_dir,
            folder_name,
            moved_to,
        }))
    }
}

// Integration tests live in tests/organizer_tests.rs
