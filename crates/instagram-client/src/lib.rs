//! Instagram media resolution.
//!
//! [`extract_instagram_urls`] finds post, reel and TV links in free text; [`InstagramClient`]
//! fetches the public metadata endpoint for one link and maps the JSON (GraphQL shape first, then
//! the `items` shape) into [`MediaItem`]s.

mod client;
mod error;
mod links;
mod media;
mod payload;

pub use client::{InstagramClient, InstagramConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::InstagramError;
pub use links::{extract_instagram_urls, parse_instagram_url, ShortcodeRef};
pub use media::{MediaItem, MediaKind};
pub use payload::parse_media_payload;
