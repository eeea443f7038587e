use thiserror::Error;

/// Why a link could not be resolved. Display strings are shown to users as-is.
#[derive(Error, Debug)]
pub enum InstagramError {
    #[error("Only instagram.com URLs are supported.")]
    UnsupportedHost,

    #[error("The provided link is not a supported Instagram post or reel URL.")]
    UnsupportedPath,

    #[error("Instagram did not return a successful response. The post may be private or unavailable.")]
    /// `status` is for logs only; the message shown to users leaves it out.
    Unavailable { status: u16 },

    #[error("Unable to parse the Instagram response.")]
    InvalidResponse,

    #[error("No downloadable media found in this Instagram URL.")]
    NoMedia,

    #[error("Video URL missing from Instagram response.")]
    MissingVideoUrl,

    #[error("Image URL missing from Instagram response.")]
    MissingImageUrl,

    #[error("Request to Instagram failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl InstagramError {
    /// True for network-level failures (connect, timeout, TLS) as opposed to answers Instagram
    /// gave us.
    pub fn is_transport(&self) -> bool {
        matches!(self, InstagramError::Http(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_message_hides_status_code() {
        let message = InstagramError::Unavailable { status: 404 }.to_string();
        assert!(message.contains("private or unavailable"));
        assert!(!message.contains("404"));
    }

    #[test]
    fn test_only_http_errors_are_transport() {
        assert!(!InstagramError::NoMedia.is_transport());
        assert!(!InstagramError::Unavailable { status: 500 }.is_transport());
    }
}
