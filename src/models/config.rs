//! Configuration model.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Filesystem locations.
    pub paths: PathsConfig,
    /// Bilibili configuration.
    pub bilibili: BilibiliConfig,
    /// Pipeline pacing.
    pub pipeline: PipelineConfig,
}

/// Filesystem locations used by a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory holding downloaded videos.
    pub source_dir: PathBuf,
    /// Root under which per-video folders are created.
    pub target_dir: PathBuf,
    /// Catalog workbook (.xlsx).
    pub catalog_path: PathBuf,
}

/// Bilibili configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BilibiliConfig {
    /// Search endpoint.
    pub search_url: String,
    /// Prefix joined with a bvid to form the video page URL.
    pub video_url_prefix: String,
    /// User-Agent sent with every request.
    pub user_agent: String,
    /// Request timeout in seconds.
    pub timeout: u64,
}

/// Pipeline pacing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Pause after each cataloged file, in milliseconds.
    pub request_delay_ms: u64,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("downloads"),
            target_dir: PathBuf::from("processing"),
            catalog_path: PathBuf::from("video_info.xlsx"),
        }
    }
}

impl Default for BilibiliConfig {
    fn default() -> Self {
        Self {
            search_url: "https://api.bilibili.com/x/web-interface/search/all/v2".to_string(),
            video_url_prefix: "https://www.bilibili.com/video/".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string(),
            timeout: 10,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            request_delay_ms: 1000,
        }
    }
}

/// Get the configuration directory path.
fn dirs_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("video_cataloger")
}

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs_config_path().join("config.toml")
}

/// Parse a configuration file.
pub fn load_config_file(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Err(crate::Error::PathNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| crate::Error::Config(format!("{}: {}", path.display(), e)))
}

/// Load configuration.
///
/// An explicit path must exist and parse. Without one, the default location is
/// tried and built-in defaults are used when it is absent or unreadable.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return load_config_file(path);
    }

    let config_path = default_config_path();
    if config_path.exists() {
        match load_config_file(&config_path) {
            Ok(config) => return Ok(config),
            Err(e) => tracing::warn!("Ignoring config file: {}", e),
        }
    }

    Ok(Config::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.bilibili.timeout, 10);
        assert_eq!(config.pipeline.request_delay_ms, 1000);
        assert_eq!(config.paths.catalog_path, PathBuf::from("video_info.xlsx"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[paths]\nsource_dir = \"/videos/in\"\n\n[pipeline]\nrequest_delay_ms = 0\n",
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.paths.source_dir, PathBuf::from("/videos/in"));
        assert_eq!(config.paths.target_dir, PathBuf::from("processing"));
        assert_eq!(config.pipeline.request_delay_ms, 0);
        assert_eq!(config.bilibili.timeout, 10);
    }

    #[test]
    fn test_explicit_missing_file() {
        let result = load_config(Some(Path::new("/nonexistent/config.toml")));
        assert!(matches!(result, Err(crate::Error::PathNotFound(_))));
    }

    #[test]
    fn test_invalid_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[pipeline]\nrequest_delay_ms = \"soon\"\n").unwrap();

        assert!(matches!(
            load_config(Some(&path)),
            Err(crate::Error::Config(_))
        ));
    }
}
