use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MediaKind {
    Photo,
    Video,
}

/// A single downloadable media resource of a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaItem {
    pub url: String,
    pub kind: MediaKind,
    pub caption: Option<String>,
}

impl MediaItem {
    pub fn photo(url: impl Into<String>, caption: Option<String>) -> Self {
        Self {
            url: url.into(),
            kind: MediaKind::Photo,
            caption,
        }
    }

    pub fn video(url: impl Into<String>, caption: Option<String>) -> Self {
        Self {
            url: url.into(),
            kind: MediaKind::Video,
            caption,
        }
    }

    pub fn is_video(&self) -> bool {
        self.kind == MediaKind::Video
    }
}
