//! Bilibili search preflight check.

use super::CheckResult;
use crate::models::config::BilibiliConfig;
use crate::services::bilibili::BilibiliClient;

/// Check if the search endpoint is reachable.
pub async fn check(config: &BilibiliConfig) -> CheckResult {
    let client = match BilibiliClient::new(config.clone()) {
        Ok(client) => client,
        Err(e) => {
            return CheckResult::fail(
                "Bilibili search",
                &format!("client setup failed: {}", e),
                "Check the [bilibili] section of your config",
            )
        }
    };

    match client.ping().await {
        Ok(status) if status.is_success() => CheckResult::ok("Bilibili search", "reachable"),
        Ok(status) => CheckResult::fail(
            "Bilibili search",
            &format!("responded with {}", status),
            "Lookups will fall back to bare catalog rows",
        ),
        Err(_) => CheckResult::fail(
            "Bilibili search",
            "connection failed",
            "Check your network connection",
        ),
    }
}
