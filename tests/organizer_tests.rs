//! Integration tests for the directory organizer.
//!
//! Tests cover:
//! - Folder layout and file move
//! - Skipping files already in the catalog
//! - Shared folders and refusal to overwrite
//! - Move failures

use std::fs;
use std::path::Path;
use tempfile::TempDir;
use video_cataloger::core::catalog::Catalog;
use video_cataloger::core::organizer::{OrganizeOutcome, Organizer};
use video_cataloger::models::media::{CatalogEntry, VideoFile};
use video_cataloger::Error;

fn video_file(path: &Path) -> VideoFile {
    VideoFile {
        path: path.to_path_buf(),
        filename: path.file_name().unwrap().to_string_lossy().to_string(),
        extension: path.extension().unwrap().to_string_lossy().to_lowercase(),
        size: fs::metadata(path).map(|m| m.len()).unwrap_or(0),
    }
}

struct Fixture {
    _temp: TempDir,
    source: std::path::PathBuf,
    target: std::path::PathBuf,
    catalog: Catalog,
}

fn fixture() -> Fixture {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("downloads");
    let target = temp.path().join("processing");
    fs::create_dir_all(&source).unwrap();
    let catalog = Catalog::load(&temp.path().join("video_info.xlsx")).unwrap();
    Fixture {
        _temp: temp,
        source,
        target,
        catalog,
    }
}

#[test]
fn test_organize_creates_layout_and_moves_file() {
    let fx = fixture();
    let path = fx.source.join("movie1.mp4");
    fs::write(&path, "fake video").unwrap();

    let organizer = Organizer::new(&fx.target);
    let outcome = organizer.organize(&video_file(&path), &fx.catalog).unwrap();

    let organized = match outcome {
        OrganizeOutcome::Organized(o) => o,
        OrganizeOutcome::Skipped => panic!("Expected Organized"),
    };

    assert_eq!(organized.folder_name, "movie1");
    assert_eq!(organized.video_dir, fx.target.join("movie1"));
    assert_eq!(
        organized.moved_to,
        fx.target.join("movie1").join("cut_video").join("movie1.mp4")
    );
    assert!(!path.exists());
    assert_eq!(fs::read_to_string(&organized.moved_to).unwrap(), "fake video");

    let original_video = fx.target.join("movie1").join("original_video");
    assert!(original_video.is_dir());
    assert_eq!(fs::read_dir(&original_video).unwrap().count(), 0);
}

#[test]
fn test_organize_sanitizes_folder_name() {
    let fx = fixture();
    let path = fx.source.join("what? a|movie.mkv");
    fs::write(&path, "fake").unwrap();

    let organizer = Organizer::new(&fx.target);
    let outcome = organizer.organize(&video_file(&path), &fx.catalog).unwrap();

    match outcome {
        OrganizeOutcome::Organized(o) => {
            assert_eq!(o.folder_name, "what_ a_movie");
            assert!(o.moved_to.ends_with("what_ a_movie/cut_video/what? a|movie.mkv"));
        }
        OrganizeOutcome::Skipped => panic!("Expected Organized"),
    }
}

#[test]
fn test_organize_skips_cataloged_file() {
    let mut fx = fixture();
    let path = fx.source.join("movie1.mp4");
    fs::write(&path, "fake").unwrap();
    fx.catalog
        .append(CatalogEntry::fallback("movie1", "movie1.mp4"))
        .unwrap();

    let organizer = Organizer::new(&fx.target);
    let outcome = organizer.organize(&video_file(&path), &fx.catalog).unwrap();

    assert!(matches!(outcome, OrganizeOutcome::Skipped));
    assert!(path.exists());
    assert!(!fx.target.join("movie1").exists());
}

#[test]
fn test_organize_existing_folder_is_reused() {
    let fx = fixture();
    let cut_video = fx.target.join("movie1").join("cut_video");
    fs::create_dir_all(&cut_video).unwrap();
    fs::write(cut_video.join("other.mp4"), "other").unwrap();

    // " movie1 .mkv" sanitizes to the same folder as an earlier "movie1.mp4"
    let path = fx.source.join(" movie1 .mkv");
    fs::write(&path, "fake").unwrap();

    let organizer = Organizer::new(&fx.target);
    let outcome = organizer.organize(&video_file(&path), &fx.catalog).unwrap();

    assert!(matches!(outcome, OrganizeOutcome::Organized(_)));
    assert!(cut_video.join(" movie1 .mkv").exists());
    assert!(cut_video.join("other.mp4").exists());
}

#[test]
fn test_organize_never_overwrites() {
    let fx = fixture();
    let cut_video = fx.target.join("movie1").join("cut_video");
    fs::create_dir_all(&cut_video).unwrap();
    fs::write(cut_video.join("movie1.mp4"), "first").unwrap();

    let path = fx.source.join("movie1.mp4");
    fs::write(&path, "second").unwrap();

    let organizer = Organizer::new(&fx.target);
    let result = organizer.organize(&video_file(&path), &fx.catalog);

    assert!(matches!(result, Err(Error::FileAlreadyExists(_))));
    assert!(path.exists());
    assert_eq!(fs::read_to_string(cut_video.join("movie1.mp4")).unwrap(), "first");
}

#[test]
fn test_organize_vanished_file() {
    let fx = fixture();
    let path = fx.source.join("movie1.mp4");
    fs::write(&path, "fake").unwrap();
    let file = video_file(&path);
    fs::remove_file(&path).unwrap();

    let organizer = Organizer::new(&fx.target);
    let result = organizer.organize(&file, &fx.catalog);

    assert!(matches!(result, Err(Error::FileMove(_))));
}
