//! Text-to-image generation clients.
//!
//! [`ImageGenerator`] is the seam the bot handler depends on. Two backends implement it:
//! - [`PollingImageClient`]: submits a prediction job and polls it at a fixed interval until it
//!   finishes or the deadline passes.
//! - [`OpenAiImageClient`]: OpenAI images API (DALL-E), which answers synchronously.

mod error;
mod generator;
mod openai;
mod polling;

pub use error::ImageGenerationError;
pub use generator::{mask_api_key, prompt_preview, GeneratedImage, ImageGenerator};
pub use openai::OpenAiImageClient;
pub use polling::{
    PollingConfig, PollingImageClient, DEFAULT_POLLING_BASE_URL, DEFAULT_POLL_INTERVAL,
    DEFAULT_TIMEOUT,
};

pub use async_openai::types::ImageSize;
