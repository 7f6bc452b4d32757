//! Error types for the video cataloger.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the video cataloger.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    // File system errors
    #[error("Path not found: {0}")]
    PathNotFound(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("File already exists: {0}")]
    FileAlreadyExists(String),

    #[error("Failed to move file: {0}")]
    FileMove(String),

    // Catalog errors
    #[error("Failed to read catalog: {0}")]
    CatalogRead(String),

    #[error("Failed to write catalog: {0}")]
    CatalogWrite(String),

    #[error("Catalog already contains: {0}")]
    DuplicateEntry(String),

    // Remote errors
    #[error("Bilibili search failed: {0}")]
    SearchFailed(String),

    #[error("Cover download failed: {0}")]
    CoverDownload(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
