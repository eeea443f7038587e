//! Recognizing Instagram post/reel/TV links.

use crate::error::InstagramError;
use lazy_static::lazy_static;
use regex::Regex;
use url::Url;

const INSTAGRAM_HOSTS: &[&str] = &["instagram.com", "www.instagram.com"];

lazy_static! {
    static ref CANDIDATE_URL: Regex = Regex::new(r"https?://[^\s]+").expect("valid regex");
    static ref POST_PATH: Regex =
        Regex::new(r"^(?P<kind>p|reel|tv)/(?P<code>[A-Za-z0-9_-]+)").expect("valid regex");
}

/// Media type segment and shortcode of a post, e.g. `reel` / `C1a2B3`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcodeRef {
    pub kind: String,
    pub code: String,
}

impl ShortcodeRef {
    /// `https://www.instagram.com/{kind}/{code}/`
    pub fn canonical_url(&self) -> String {
        format!("https://www.instagram.com/{}/{}/", self.kind, self.code)
    }
}

fn match_post(url: &Url) -> Result<ShortcodeRef, InstagramError> {
    let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
    if !INSTAGRAM_HOSTS.contains(&host.as_str()) {
        return Err(InstagramError::UnsupportedHost);
    }

    let path = url.path().trim_matches('/');
    let caps = POST_PATH
        .captures(path)
        .ok_or(InstagramError::UnsupportedPath)?;

    Ok(ShortcodeRef {
        kind: caps["kind"].to_string(),
        code: caps["code"].to_string(),
    })
}

/// Parses a link into its post reference. Foreign hosts give `UnsupportedHost`; Instagram links
/// that are not posts, reels or TV give `UnsupportedPath`.
pub fn parse_instagram_url(url: &str) -> Result<ShortcodeRef, InstagramError> {
    let parsed = Url::parse(url.trim()).map_err(|_| InstagramError::UnsupportedHost)?;
    match_post(&parsed)
}

/// Extracts canonical post/reel/TV URLs from arbitrary text, in order of appearance. A link that
/// appears twice is returned twice.
pub fn extract_instagram_urls(text: &str) -> Vec<String> {
    CANDIDATE_URL
        .find_iter(text)
        .filter_map(|candidate| Url::parse(candidate.as_str()).ok())
        .filter_map(|parsed| match_post(&parsed).ok())
        .map(|post| post.canonical_url())
        .collect()
}
