//! GitHub archive client.
//!
//! Downloads the zip archive of an addon's default branch.

use std::time::Instant;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::parser::parse_specifier;
use super::types::{AddonError, AddonSpecifier, RawArchive};

/// Default host serving repository archives.
pub const DEFAULT_SOURCE_HOST: &str = "https://github.com";

/// Branch whose archive is downloaded.
pub const DEFAULT_BRANCH: &str = "master";

/// Default User-Agent sent with archive requests.
pub const DEFAULT_USER_AGENT: &str = "gamemaster-addon-loader";

/// Source of addon archives.
#[async_trait]
pub trait ArchiveSource: Send + Sync {
    /// Fetches the archive for one addon. Single attempt, no retries.
    async fn fetch(&self, addon: &AddonSpecifier) -> Result<RawArchive, AddonError>;
}

/// Fetches addon archives over unauthenticated HTTP GET.
#[derive(Debug, Clone)]
pub struct GitHubArchiveClient {
    /// HTTP client.
    client: reqwest::Client,
    /// Base URL, without trailing slash.
    base_url: String,
    /// Branch to download.
    branch: String,
}

impl Default for GitHubArchiveClient {
    fn default() -> Self {
        Self::new(DEFAULT_SOURCE_HOST, DEFAULT_BRANCH)
    }
}

impl GitHubArchiveClient {
    /// Creates a client for the given host and branch.
    #[must_use]
    pub fn new(base_url: &str, branch: &str) -> Self {
        Self::with_user_agent(base_url, branch, DEFAULT_USER_AGENT)
    }

    /// Creates a client sending a custom User-Agent.
    #[must_use]
    pub fn with_user_agent(base_url: &str, branch: &str, user_agent: &str) -> Self {
        assert!(!base_url.is_empty(), "Base URL must not be empty");
        assert!(!branch.is_empty(), "Branch must not be empty");

        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            branch: branch.to_string(),
        }
    }

    /// Returns the archive URL for an addon.
    #[must_use]
    pub fn archive_url(&self, addon: &AddonSpecifier) -> String {
        format!(
            "{}/{}/{}/archive/{}.zip",
            self.base_url,
            addon.owner(),
            addon.repo(),
            self.branch
        )
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the branch.
    #[must_use]
    pub fn branch(&self) -> &str {
        &self.branch
    }
}

#[async_trait]
impl ArchiveSource for GitHubArchiveClient {
    async fn fetch(&self, addon: &AddonSpecifier) -> Result<RawArchive, AddonError> {
        // Specifiers are normally validated upstream; re-check before building a URL.
        let addon = parse_specifier(&addon.to_string())?;

        let url = self.archive_url(&addon);
        debug!("[ADDON] fetch: GET {}", url);
        let start = Instant::now();

        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!("[ADDON] HTTP request failed: {}", e);
            AddonError::Transport(e.to_string())
        })?;

        let status = response.status();
        debug!("[ADDON] Response: {} in {:?}", status, start.elapsed());

        if status != reqwest::StatusCode::OK {
            warn!("[ADDON] {} responded with {}", url, status);
            return Err(AddonError::Remote {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|e| {
            warn!("[ADDON] Failed to read archive body: {}", e);
            AddonError::Transport(format!("Failed to read response: {}", e))
        })?;

        info!(
            "[ADDON] Downloaded {} ({} bytes) in {:?}",
            addon,
            bytes.len(),
            start.elapsed()
        );
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test archive url.
    #[test]
    fn test_archive_url() {
        let client = GitHubArchiveClient::default();
        let addon = parse_specifier("slack-rpg/addon-official").unwrap();
        assert_eq!(
            client.archive_url(&addon),
            "https://github.com/slack-rpg/addon-official/archive/master.zip"
        );
    }

    /// Test custom host and branch.
    #[test]
    fn test_custom_host_and_branch() {
        let client = GitHubArchiveClient::new("http://127.0.0.1:8080/", "main");
        assert_eq!(client.base_url(), "http://127.0.0.1:8080");
        assert_eq!(client.branch(), "main");

        let addon = parse_specifier("a/b").unwrap();
        assert_eq!(client.archive_url(&addon), "http://127.0.0.1:8080/a/b/archive/main.zip");
    }

    /// Test empty branch.
    #[test]
    #[should_panic(expected = "Branch must not be empty")]
    fn test_empty_branch() {
        let _ = GitHubArchiveClient::new(DEFAULT_SOURCE_HOST, "");
    }

    /// Test that a malformed specifier is refused before any request is sent.
    #[tokio::test]
    async fn test_fetch_rejects_invalid_specifier() {
        // Closed port: reaching the network would surface as Transport instead.
        let client = GitHubArchiveClient::new("http://127.0.0.1:9", DEFAULT_BRANCH);
        let addon = AddonSpecifier::new("a b", "c.d");
        let err = client.fetch(&addon).await.unwrap_err();
        assert_eq!(err, AddonError::InvalidSpecifier("a b/c.d".to_string()));
    }

    /// Test transport error.
    #[tokio::test]
    async fn test_transport_error() {
        // Port 9 (discard) on localhost is closed in test environments.
        let client = GitHubArchiveClient::new("http://127.0.0.1:9", DEFAULT_BRANCH);
        let addon = parse_specifier("a/b").unwrap();
        let err = client.fetch(&addon).await.unwrap_err();
        assert!(matches!(err, AddonError::Transport(_)), "got {:?}", err);
    }
}
