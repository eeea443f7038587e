use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImageGenerationError {
    #[error("Prompt is empty")]
    InvalidPrompt,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Image API returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("OpenAI error: {0}")]
    OpenAi(#[from] async_openai::error::OpenAIError),

    #[error("Unexpected response from image API: {0}")]
    InvalidResponse(String),

    #[error("Image generation failed: {0}")]
    Failed(String),

    #[error("Image API returned no image")]
    EmptyOutput,

    #[error("Image generation timed out after {}s", elapsed.as_secs())]
    Timeout { elapsed: Duration },
}

impl ImageGenerationError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ImageGenerationError::Timeout { .. })
    }
}
