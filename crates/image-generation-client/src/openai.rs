//! OpenAI DALL-E image generation client.

use crate::error::ImageGenerationError;
use crate::generator::{mask_api_key, prompt_preview, validate_prompt, GeneratedImage, ImageGenerator};
use async_openai::{
    config::OpenAIConfig,
    types::{CreateImageRequestArgs, Image, ImageModel, ImageResponseFormat, ImageSize},
    Client,
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, instrument};

/// OpenAI images client. The API answers synchronously, so there is nothing to poll.
#[derive(Clone)]
pub struct OpenAiImageClient {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
    size: ImageSize,
    masked_key: String,
}

fn image_model(model: &str) -> ImageModel {
    match model {
        "dall-e-2" => ImageModel::DallE2,
        "dall-e-3" => ImageModel::DallE3,
        other => ImageModel::Other(other.to_string()),
    }
}

impl OpenAiImageClient {
    pub fn new(api_key: String) -> Self {
        Self::build(OpenAIConfig::new().with_api_key(api_key.clone()), &api_key)
    }

    /// Client for an OpenAI-compatible service at `base_url`.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key.clone())
            .with_api_base(base_url);
        Self::build(config, &api_key)
    }

    fn build(config: OpenAIConfig, api_key: &str) -> Self {
        Self {
            client: Arc::new(Client::with_config(config)),
            model: "dall-e-3".to_string(),
            size: ImageSize::S1024x1024,
            masked_key: mask_api_key(api_key),
        }
    }

    /// `dall-e-2`, `dall-e-3` or any model name the service accepts.
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn with_size(mut self, size: ImageSize) -> Self {
        self.size = size;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ImageGenerator for OpenAiImageClient {
    fn name(&self) -> &'static str {
        "openai"
    }

    #[instrument(skip(self, prompt))]
    async fn generate_image(&self, prompt: &str) -> Result<GeneratedImage, ImageGenerationError> {
        let prompt = validate_prompt(prompt)?;

        info!(
            model = %self.model,
            size = ?self.size,
            prompt_preview = %prompt_preview(prompt),
            api_key = %self.masked_key,
            "OpenAI image generation request"
        );

        let request = CreateImageRequestArgs::default()
            .prompt(prompt)
            .model(image_model(&self.model))
            .size(self.size)
            .response_format(ImageResponseFormat::Url)
            .n(1)
            .build()?;

        let response = self.client.images().create(request).await?;

        match response.data.first().map(|image| image.as_ref()) {
            Some(Image::Url { url, .. }) => {
                info!(image_url = %url, "OpenAI image generation completed");
                Ok(GeneratedImage {
                    url: url.to_string(),
                    prompt: prompt.to_string(),
                })
            }
            _ => Err(ImageGenerationError::EmptyOutput),
        }
    }
}
