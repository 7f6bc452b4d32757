//! Folder name generator.

use crate::utils::fs::is_video_extension;

/// Folder name used when nothing printable is left after sanitizing.
const EMPTY_FOLDER_NAME: &str = "untitled";

/// Derive the per-video folder name from a filename.
///
/// Trailing video extensions are dropped, characters Windows rejects in paths
/// (`< > : " / \ | ? *`) become `_`, and surrounding whitespace is trimmed.
/// Applying it twice gives the same result as applying it once.
pub fn sanitize_folder_name(name: &str) -> String {
    let mut stem = name.trim();

    // "a.mp4.mkv" loses both, so a second pass finds nothing left to strip
    while let Some((rest, ext)) = stem.rsplit_once('.') {
        if rest.trim().is_empty() || !is_video_extension(ext) {
            break;
        }
        stem = rest.trim_end();
    }

    let cleaned = sanitize_filename(stem);
    let cleaned = cleaned.trim();

    // "." and ".." would resolve outside the folder
    if cleaned.chars().all(|c| c == '.') {
        if cleaned.is_empty() {
            return EMPTY_FOLDER_NAME.to_string();
        }
        return "_".repeat(cleaned.len());
    }

    cleaned.to_string()
}

/// Sanitize a string for use in filenames.
fn sanitize_filename(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}
