//! Main music site client.

use crate::download::DownloadClient;
use crate::error::{Result, SiteClientError};
use crate::tracking::TrackingClient;
use crate::types::{DownloadReport, DownloadRequest, DownloadedFile, SiteConfig};
use reqwest::Client;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Header carrying the CSRF token on mutating requests.
pub(crate) const CSRF_HEADER: &str = "X-CSRFToken";

/// Main client for interacting with a music site.
///
/// The client validates the site URL once, shares a pooled HTTP client
/// across calls, and hands out per-concern sub-clients for play
/// tracking and downloads.
///
/// # Example
///
/// ```ignore
/// use muse_site_client::{MusicSiteClient, SiteConfig};
///
/// // Create client
/// let config = SiteConfig::with_csrf_token("https://music.example.com", "token");
/// let client = MusicSiteClient::new(config)?;
///
/// // Count a play (falls back to anonymous tracking on 401)
/// let outcome = client.tracking().await.track_play("42").await?;
/// println!("Play outcome: {:?}", outcome);
///
/// // Download a song and report it
/// let file = client.download_song(&request, download_dir).await?;
/// println!("Saved {}", file.path.display());
/// ```
pub struct MusicSiteClient {
    http: Client,
    config: Arc<RwLock<SiteConfig>>,
}

impl MusicSiteClient {
    /// Create a new client with the given configuration.
    pub fn new(config: SiteConfig) -> Result<Self> {
        // Validate URL
        if config.base_url.is_empty() {
            return Err(SiteClientError::InvalidUrl("URL cannot be empty".into()));
        }

        // Parse and normalize URL
        let base_url = config.base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(SiteClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let normalized_config = SiteConfig {
            base_url,
            csrf_token: config.csrf_token,
        };

        // Create HTTP client with reasonable defaults
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("MusePlayer/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(SiteClientError::Request)?;

        Ok(Self {
            http,
            config: Arc::new(RwLock::new(normalized_config)),
        })
    }

    /// Get the site base URL.
    pub async fn base_url(&self) -> String {
        self.config.read().await.base_url.clone()
    }

    /// Replace the CSRF token used for mutating requests.
    ///
    /// Pass `None` to drop the token, e.g. after the session expires.
    pub async fn set_csrf_token(&self, token: Option<String>) {
        let mut config = self.config.write().await;
        config.csrf_token = token;
    }

    /// Get the current CSRF token.
    pub async fn csrf_token(&self) -> Option<String> {
        self.config.read().await.csrf_token.clone()
    }

    /// Get a tracking client for play counting and analytics.
    pub async fn tracking(&self) -> TrackingClient {
        let config = self.config.read().await;
        TrackingClient::new(
            self.http.clone(),
            config.base_url.clone(),
            config.csrf_token.clone(),
        )
    }

    /// Get a download client for fetching song files.
    pub async fn downloads(&self) -> DownloadClient {
        let config = self.config.read().await;
        DownloadClient::new(self.http.clone(), config.base_url.clone())
    }

    /// Download a song and report the download to the site.
    ///
    /// The analytics report is posted for every attempt, even when the
    /// download itself fails; reporting problems are logged and never
    /// change the returned result.
    pub async fn download_song(
        &self,
        request: &DownloadRequest,
        dest_dir: &Path,
    ) -> Result<DownloadedFile> {
        let result = self
            .downloads()
            .await
            .download_to_dir(request, dest_dir)
            .await;

        let report = DownloadReport::new(request);
        self.tracking().await.report_download_logged(&report).await;

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_http_and_https_accepted() {
        assert!(MusicSiteClient::new(SiteConfig::new("https://muse.example.net")).is_ok());
        assert!(MusicSiteClient::new(SiteConfig::new("http://127.0.0.1:8000")).is_ok());

        for bad in ["", "muse.example.net", "ftp://muse.example.net"] {
            assert!(MusicSiteClient::new(SiteConfig::new(bad)).is_err());
        }
    }

    #[test]
    fn test_base_url_trimmed_at_construction() {
        let client = MusicSiteClient::new(SiteConfig::new("https://muse.example.net/"))
            .expect("valid url");

        let url = tokio::runtime::Runtime::new()
            .unwrap()
            .block_on(client.base_url());
        assert_eq!(url, "https://muse.example.net");
    }
}
