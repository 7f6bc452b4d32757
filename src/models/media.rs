//! Media-related data models.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Video file found by the scanner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoFile {
    /// Full path to the file.
    pub path: PathBuf,
    /// File name without path.
    pub filename: String,
    /// Lowercase extension without the dot.
    pub extension: String,
    /// File size in bytes.
    pub size: u64,
}

/// One row of the catalog workbook.
///
/// `original_filename` is the unique key: a file whose name is already in the
/// catalog is never processed again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Title shown in the catalog (remote title, or the folder name when nothing was found).
    pub display_title: String,
    /// Canonical video page URL, empty when not found.
    pub canonical_url: String,
    /// Local cover path, remote cover URL, or empty.
    pub cover_reference: String,
    /// Name of the file as it was found in the source directory.
    pub original_filename: String,
}

impl CatalogEntry {
    /// Row written when the lookup found nothing.
    pub fn fallback(folder_name: &str, original_filename: &str) -> Self {
        Self {
            display_title: folder_name.to_string(),
            canonical_url: String::new(),
            cover_reference: String::new(),
            original_filename: original_filename.to_string(),
        }
    }
}

/// Metadata for the first search hit on Bilibili.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoMetadata {
    /// Title with highlight markup removed.
    pub title: String,
    /// `https://www.bilibili.com/video/<bvid>`, empty if the hit had no bvid.
    pub canonical_url: String,
    /// Cover image URL, possibly empty.
    pub cover_url: String,
    /// Platform identifier (bvid).
    pub platform_id: String,
    /// Uploader name.
    pub author: String,
    /// Duration as reported by the search API, e.g. `4:35`.
    pub duration: String,
    /// Numeric archive id.
    pub aid: Option<u64>,
}
