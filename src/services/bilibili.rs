//! Bilibili search API client.

use crate::models::config::BilibiliConfig;
use crate::models::media::VideoMetadata;
use crate::Result;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

/// Search response envelope.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub code: i64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<SearchData>,
}

/// Search payload.
///
/// `result` is either a list of groups tagged with `result_type`, an object
/// keyed by type, or a flat list of videos, depending on the endpoint.
#[derive(Debug, Deserialize)]
pub struct SearchData {
    #[serde(default)]
    pub result: Value,
}

/// Video search item.
#[derive(Debug, Deserialize)]
pub struct VideoItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub bvid: String,
    #[serde(default)]
    pub pic: String,
    #[serde(default)]
    pub author: String,
    /// `"mm:ss"` on the search endpoints, seconds elsewhere.
    #[serde(default)]
    pub duration: Value,
    /// Number or numeric string.
    #[serde(default)]
    pub aid: Value,
}

/// Bilibili API client.
pub struct BilibiliClient {
    config: BilibiliConfig,
    client: reqwest::Client,
}

impl BilibiliClient {
    /// Create a new client.
    pub fn new(config: BilibiliConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { config, client })
    }

    /// Build the search URL for a keyword, asking for the first result only.
    fn build_search_url(&self, keyword: &str) -> String {
        format!(
            "{}?keyword={}&page=1&pagesize=1",
            self.config.search_url,
            urlencoding::encode(keyword)
        )
    }

    /// Check that the search endpoint answers at all.
    pub async fn ping(&self) -> Result<reqwest::StatusCode> {
        let resp = self.client.get(self.build_search_url("test")).send().await?;
        Ok(resp.status())
    }

    /// Search for a video and return the first hit.
    ///
    /// `Ok(None)` means the search worked but had no video results.
    pub async fn try_search(&self, title: &str) -> Result<Option<VideoMetadata>> {
        let url = self.build_search_url(title);
        tracing::debug!("Searching Bilibili: {}", url);

        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            return Err(crate::Error::SearchFailed(format!("HTTP {}", status)));
        }

        let body: SearchResponse = resp.json().await?;
        if body.code != 0 {
            return Err(crate::Error::SearchFailed(format!(
                "code {}: {}",
                body.code,
                body.message.unwrap_or_default()
            )));
        }

        let first = match body.data.as_ref().and_then(|d| first_video(&d.result)) {
            Some(first) => first,
            None => return Ok(None),
        };
        let item: VideoItem = serde_json::from_value(first.clone())?;

        Ok(Some(self.to_metadata(item)))
    }

    /// Search for a video, treating every failure as "not found".
    pub async fn search(&self, title: &str) -> Option<VideoMetadata> {
        match self.try_search(title).await {
            Ok(Some(metadata)) => {
                tracing::info!("Found on Bilibili: {} ({})", metadata.title, metadata.platform_id);
                Some(metadata)
            }
            Ok(None) => {
                tracing::info!("No Bilibili results for: {}", title);
                None
            }
            Err(e) => {
                tracing::warn!("Bilibili search for {} failed: {}", title, e);
                None
            }
        }
    }

    fn to_metadata(&self, item: VideoItem) -> VideoMetadata {
        let canonical_url = if item.bvid.is_empty() {
            String::new()
        } else {
            format!("{}{}", self.config.video_url_prefix, item.bvid)
        };

        let metadata = VideoMetadata {
            title: clean_title(&item.title),
            canonical_url,
            cover_url: normalize_cover_url(&item.pic),
            platform_id: item.bvid,
            author: item.author.trim().to_string(),
            duration: value_to_string(&item.duration),
            aid: value_to_u64(&item.aid),
        };
        tracing::debug!(
            "Hit details: author={:?} duration={:?} aid={:?}",
            metadata.author,
            metadata.duration,
            metadata.aid
        );
        metadata
    }
}

/// Locate the first video object in a search result.
fn first_video(result: &Value) -> Option<&Value> {
    let videos = match result {
        Value::Array(items) => {
            let is_flat = items.first().map(|i| i.get("bvid").is_some()).unwrap_or(false);
            if is_flat {
                result
            } else {
                items
                    .iter()
                    .find(|g| g.get("result_type").and_then(Value::as_str) == Some("video"))
                    .and_then(|g| g.get("data"))?
            }
        }
        Value::Object(groups) => groups.get("video").and_then(|g| g.get("data"))?,
        _ => return None,
    };

    videos.as_array()?.first()
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

fn value_to_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Remove search highlight tags and decode the few entities Bilibili emits.
pub fn clean_title(title: &str) -> String {
    let mut cleaned = title.to_string();
    if let Ok(re) = regex::Regex::new(r"</?em[^>]*>") {
        cleaned = re.replace_all(&cleaned, "").to_string();
    }

    cleaned
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
        .trim()
        .to_string()
}

/// Covers often come back protocol-relative (`//i0.hdslb.com/...`).
pub fn normalize_cover_url(pic: &str) -> String {
    let pic = pic.trim();
    if pic.starts_with("//") {
        format!("https:{}", pic)
    } else {
        pic.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_clean_title() {
        assert_eq!(
            clean_title(r#"<em class="keyword">Movie</em> One"#),
            "Movie One"
        );
        assert_eq!(clean_title("Tom &amp; Jerry &quot;Live&quot;"), "Tom & Jerry \"Live\"");
        assert_eq!(clean_title("plain"), "plain");
    }

    #[test]
    fn test_normalize_cover_url() {
        assert_eq!(
            normalize_cover_url("//i0.hdslb.com/bfs/archive/a.jpg"),
            "https://i0.hdslb.com/bfs/archive/a.jpg"
        );
        assert_eq!(normalize_cover_url("http://x/cover.jpg"), "http://x/cover.jpg");
        assert_eq!(normalize_cover_url(""), "");
    }

    #[test]
    fn test_value_conversions() {
        assert_eq!(value_to_string(&json!("4:35")), "4:35");
        assert_eq!(value_to_string(&json!(275)), "275");
        assert_eq!(value_to_string(&Value::Null), "");
        assert_eq!(value_to_u64(&json!(170001)), Some(170001));
        assert_eq!(value_to_u64(&json!("170001")), Some(170001));
        assert_eq!(value_to_u64(&json!(-1)), None);
        assert_eq!(value_to_u64(&Value::Null), None);
    }

    #[test]
    fn test_first_video_grouped() {
        let result = json!([
            { "result_type": "bili_user", "data": [{ "uname": "someone" }] },
            { "result_type": "video", "data": [{ "bvid": "BV1" }, { "bvid": "BV2" }] }
        ]);
        assert_eq!(first_video(&result).unwrap()["bvid"], "BV1");
    }

    #[test]
    fn test_first_video_keyed() {
        let result = json!({ "video": { "data": [{ "bvid": "BV9" }] } });
        assert_eq!(first_video(&result).unwrap()["bvid"], "BV9");
    }

    #[test]
    fn test_first_video_flat() {
        let result = json!([{ "bvid": "BV5", "title": "t" }]);
        assert_eq!(first_video(&result).unwrap()["bvid"], "BV5");
    }

    #[test]
    fn test_first_video_missing() {
        assert!(first_video(&json!(null)).is_none());
        assert!(first_video(&json!([])).is_none());
        assert!(first_video(&json!({ "video": { "data": [] } })).is_none());
        assert!(first_video(&json!([{ "result_type": "video", "data": [] }])).is_none());
    }
}
