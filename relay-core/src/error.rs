//! Error types for the bot core.
//!
//! [`RelayError`] is the top-level error; [`HandlerError`] is used for handler failures.

use thiserror::Error;

/// Top-level error for the relay bots: transport failures and handler rejections.
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Bot error: {0}")]
    Bot(String),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),
}

/// Errors produced by handlers. Unauthorized is raised by the allowlist in `before()`.
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("Unauthorized access")]
    Unauthorized,
}

/// Result type for core operations; uses [`RelayError`].
pub type Result<T> = std::result::Result<T, RelayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_error_converts_into_relay_error() {
        let err: RelayError = HandlerError::Unauthorized.into();
        assert!(matches!(err, RelayError::Handler(HandlerError::Unauthorized)));
        assert_eq!(err.to_string(), "Handler error: Unauthorized access");
    }

    #[test]
    fn test_bot_error_display() {
        let err = RelayError::Bot("chat not found".to_string());
        assert_eq!(err.to_string(), "Bot error: chat not found");
    }
}
