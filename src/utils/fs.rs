//! File system utilities.

use crate::Result;
use std::path::Path;

/// Video extensions the cataloger picks up (lowercase, without the dot).
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mkv", "mov", "wmv", "flv", "webm"];

/// Check if a path exists and is a directory.
pub fn ensure_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(crate::Error::PathNotFound(path.display().to_string()));
    }
    if !path.is_dir() {
        return Err(crate::Error::NotADirectory(path.display().to_string()));
    }
    Ok(())
}

/// Move a file from one location to another.
pub fn move_file(from: &Path, to: &Path) -> Result<()> {
    // Try rename first (fast, same filesystem)
    if std::fs::rename(from, to).is_ok() {
        return Ok(());
    }

    // Fall back to copy + delete (cross filesystem)
    std::fs::copy(from, to)?;
    if let Err(e) = std::fs::remove_file(from) {
        // Leave the source in place rather than keeping two copies around
        let _ = std::fs::remove_file(to);
        return Err(e.into());
    }
    Ok(())
}

/// Get file extension in lowercase.
pub fn get_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

/// Check if an extension (without the dot) is a video format.
pub fn is_video_extension(ext: &str) -> bool {
    let ext_lower = ext.to_lowercase();
    VIDEO_EXTENSIONS.contains(&ext_lower.as_str())
}

/// Check if a file is a video file based on extension.
pub fn is_video_file(path: &Path) -> bool {
    get_extension(path)
        .map(|ext| is_video_extension(&ext))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_is_video_file() {
        assert!(is_video_file(&PathBuf::from("movie.mkv")));
        assert!(is_video_file(&PathBuf::from("movie.MP4")));
        assert!(is_video_file(&PathBuf::from("clip.WebM")));
        assert!(!is_video_file(&PathBuf::from("movie.txt")));
        assert!(!is_video_file(&PathBuf::from("movie.m2ts")));
        assert!(!is_video_file(&PathBuf::from("movie")));
    }

    #[test]
    fn test_move_file() {
        let temp_dir = TempDir::new().unwrap();
        let from = temp_dir.path().join("a.mp4");
        let to = temp_dir.path().join("b.mp4");
        std::fs::write(&from, "data").unwrap();

        move_file(&from, &to).unwrap();

        assert!(!from.exists());
        assert_eq!(std::fs::read_to_string(&to).unwrap(), "data");
    }

    #[test]
    fn test_move_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = move_file(
            &temp_dir.path().join("gone.mp4"),
            &temp_dir.path().join("target.mp4"),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_ensure_directory() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("file.txt");
        std::fs::write(&file, "x").unwrap();

        assert!(ensure_directory(temp_dir.path()).is_ok());
        assert!(matches!(
            ensure_directory(&file),
            Err(crate::Error::NotADirectory(_))
        ));
        assert!(matches!(
            ensure_directory(&temp_dir.path().join("missing")),
            Err(crate::Error::PathNotFound(_))
        ));
    }
}
