//! Cover image downloader.

use crate::Result;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File name covers are saved under inside a video folder.
pub const COVER_FILENAME: &str = "cover.jpg";

/// Downloads cover images into video folders.
pub struct CoverDownloader {
    client: reqwest::Client,
}

/// Where the cover for `original_filename` goes inside `dir`.
///
/// The first video in a folder gets `cover.jpg`. Videos that share the folder
/// get `cover_<original filename>.jpg`. `None` when both are taken.
pub fn cover_path_for(dir: &Path, original_filename: &str) -> Option<PathBuf> {
    let shared = dir.join(COVER_FILENAME);
    if !shared.exists() {
        return Some(shared);
    }

    let own = dir.join(format!(
        "cover_{}.jpg",
        original_filename.replace(['/', '\\'], "_")
    ));
    if own.exists() {
        None
    } else {
        Some(own)
    }
}

impl CoverDownloader {
    /// Create a downloader with the given timeout (seconds) and User-Agent.
    pub fn new(timeout: u64, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout))
            .user_agent(user_agent.to_string())
            .build()?;
        Ok(Self { client })
    }

    /// Download the cover of `original_filename` into `dir`.
    ///
    /// An empty URL is not an error and yields `Ok(None)`. An existing cover is
    /// never overwritten.
    pub async fn try_download(
        &self,
        url: &str,
        dir: &Path,
        original_filename: &str,
    ) -> Result<Option<PathBuf>> {
        if url.is_empty() {
            return Ok(None);
        }

        let path = cover_path_for(dir, original_filename).ok_or_else(|| {
            crate::Error::FileAlreadyExists(dir.join(COVER_FILENAME).display().to_string())
        })?;

        let response = self.client.get(url).send().await?;
        if response.status() != reqwest::StatusCode::OK {
            return Err(crate::Error::CoverDownload(format!(
                "{} returned {}",
                url,
                response.status()
            )));
        }

        let bytes = response.bytes().await?;
        write_via_temp(&path, &bytes)?;

        tracing::debug!("Downloaded cover: {:?}", path);
        Ok(Some(path))
    }

    /// Download a cover, logging failures instead of returning them.
    pub async fn download(&self, url: &str, dir: &Path, original_filename: &str) -> Option<PathBuf> {
        match self.try_download(url, dir, original_filename).await {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!("Cover download failed: {}", e);
                None
            }
        }
    }
}

/// Write `bytes` to a sibling temp file and rename it into place.
///
/// A failed write leaves nothing behind at `path`.
fn write_via_temp(path: &Path, bytes: &[u8]) -> Result<()> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| COVER_FILENAME.to_string());
    let tmp_path = path.with_file_name(format!(".{}.tmp", name));

    let written = std::fs::File::create(&tmp_path)
        .and_then(|mut file| file.write_all(bytes))
        .and_then(|_| std::fs::rename(&tmp_path, path));

    if let Err(e) = written {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e.into());
    }
    Ok(())
}
