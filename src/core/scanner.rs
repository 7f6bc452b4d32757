//! Directory scanner module.
//!
//! Walks the source directory recursively and collects video files.

use crate::models::media::VideoFile;
use crate::utils::fs::{get_extension, is_video_file};
use crate::Result;
use std::path::Path;
use walkdir::WalkDir;

/// Create a VideoFile from a path.
fn create_video_file(path: &Path) -> Result<VideoFile> {
    let metadata = std::fs::metadata(path)?;

    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    Ok(VideoFile {
        path: path.to_path_buf(),
        filename,
        extension: get_extension(path).unwrap_or_default(),
        size: metadata.len(),
    })
}

/// Scan a directory for video files.
///
/// The order of the returned files depends on the filesystem.
pub fn scan_directory(path: &Path) -> Result<Vec<VideoFile>> {
    scan_directory_excluding(path, None)
}

/// Scan a directory for video files, skipping everything under `excluded`.
///
/// Used when the organized tree lives inside the source directory, so files
/// already moved there are not picked up again.
pub fn scan_directory_excluding(path: &Path, excluded: Option<&Path>) -> Result<Vec<VideoFile>> {
    crate::utils::fs::ensure_directory(path)?;

    let mut videos = Vec::new();
    let mut total_files_scanned = 0usize;

    let walker = WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| match excluded {
            Some(ex) => !e.path().starts_with(ex),
            None => true,
        });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }
        total_files_scanned += 1;

        let entry_path = entry.path();
        if !is_video_file(entry_path) {
            continue;
        }

        match create_video_file(entry_path) {
            Ok(video_file) => videos.push(video_file),
            Err(e) => {
                tracing::warn!("Failed to read video file {:?}: {}", entry_path, e);
            }
        }
    }

    tracing::info!(
        "Scanned {} files under {}: {} videos",
        total_files_scanned,
        path.display(),
        videos.len()
    );

    Ok(videos)
}

// Integration tests for scan_directory() live in tests/scanner_tests.rs
