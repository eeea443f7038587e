//! HTTP client for the public post metadata endpoint.

use crate::error::InstagramError;
use crate::links::{parse_instagram_url, ShortcodeRef};
use crate::media::MediaItem;
use crate::payload::parse_media_payload;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

pub const DEFAULT_BASE_URL: &str = "https://www.instagram.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

const DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36";

/// Connection settings. `base_url` is overridable so tests can point at a mock server.
#[derive(Debug, Clone)]
pub struct InstagramConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for InstagramConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DESKTOP_USER_AGENT.to_string(),
        }
    }
}

/// Resolves post links into media items. Single request per link, no retries.
#[derive(Clone)]
pub struct InstagramClient {
    http: reqwest::Client,
    base_url: String,
}

impl InstagramClient {
    /// Client with default base URL and timeout.
    pub fn new() -> Result<Self, InstagramError> {
        Self::with_config(InstagramConfig::default())
    }

    pub fn with_config(config: InstagramConfig) -> Result<Self, InstagramError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// `{base}/{kind}/{code}/?__a=1&__d=dis`
    pub fn metadata_url(&self, post: &ShortcodeRef) -> String {
        format!(
            "{}/{}/{}/?__a=1&__d=dis",
            self.base_url, post.kind, post.code
        )
    }

    /// Fetches downloadable media for a post or reel link.
    #[instrument(skip(self))]
    pub async fn fetch_media(&self, url: &str) -> Result<Vec<MediaItem>, InstagramError> {
        let post = parse_instagram_url(url)?;
        let api_url = self.metadata_url(&post);

        debug!(api_url = %api_url, "Fetching Instagram metadata");
        let response = self.http.get(&api_url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(status = status.as_u16(), code = %post.code, "Instagram metadata request rejected");
            return Err(InstagramError::Unavailable {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let data: serde_json::Value =
            serde_json::from_str(&body).map_err(|_| InstagramError::InvalidResponse)?;

        let media = parse_media_payload(&data)?;
        if media.is_empty() {
            debug!(
                payload_preview = %body.chars().take(500).collect::<String>(),
                "Instagram response had no media"
            );
            return Err(InstagramError::NoMedia);
        }

        info!(code = %post.code, media_count = media.len(), "Resolved Instagram media");
        Ok(media)
    }
}
