//! Image generation handler: takes a prompt from the message, generates and sends the picture.

use async_trait::async_trait;
use image_generation_client::{prompt_preview, ImageGenerator};
use relay_core::{parse_command, Bot, Handler, HandlerResponse, Message, Result};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

pub const MSG_GENERATING: &str = "🎨 Generating your image, this can take a minute...";
pub const MSG_INVALID_PROMPT: &str =
    "Please describe the image you want, e.g. /image a red fox in the snow";
pub const MSG_TIMEOUT: &str = "⏱ Image generation took too long. Please try again later.";
pub const MSG_GENERATION_FAILED: &str = "Sorry, image generation failed. Please try again later.";
pub const MSG_SEND_FAILED: &str = "Sorry, something went wrong while sending the image.";

const PROMPT_COMMANDS: &[&str] = &["image", "draw"];

/// Where the prompt came from, decided before any work is done.
#[derive(Debug, PartialEq, Eq)]
enum PromptRequest {
    /// Not for this handler.
    Skip,
    Prompt(String),
}

/// Prompts come from `/image <prompt>`, `/draw <prompt>`, free text in private chats, or group
/// messages that mention the bot.
#[derive(Clone)]
pub struct ImageGenerationHandler {
    bot_username: Arc<tokio::sync::RwLock<Option<String>>>,
    generator: Arc<dyn ImageGenerator>,
    bot: Arc<dyn Bot>,
}

impl ImageGenerationHandler {
    pub fn new(
        bot_username: Arc<tokio::sync::RwLock<Option<String>>>,
        generator: Arc<dyn ImageGenerator>,
        bot: Arc<dyn Bot>,
    ) -> Self {
        Self {
            bot_username,
            generator,
            bot,
        }
    }

    async fn prompt_request(&self, message: &Message) -> PromptRequest {
        let text = message.content.trim();
        let username = self.bot_username.read().await.clone();

        if text.starts_with('/') {
            return match parse_command(text, username.as_deref()) {
                Some(cmd) if PROMPT_COMMANDS.iter().any(|c| cmd.is(c)) => {
                    PromptRequest::Prompt(cmd.args)
                }
                _ => PromptRequest::Skip,
            };
        }

        if message.chat.is_private() {
            return PromptRequest::Prompt(text.to_string());
        }

        match username {
            Some(name) => {
                let mention = format!("@{}", name.trim_start_matches('@'));
                if text.contains(&mention) {
                    PromptRequest::Prompt(text.replace(&mention, "").trim().to_string())
                } else {
                    PromptRequest::Skip
                }
            }
            None => PromptRequest::Skip,
        }
    }

    async fn handle_image_generation(&self, message: &Message, prompt: &str) -> Result<HandlerResponse> {
        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            generator = self.generator.name(),
            prompt_preview = %prompt_preview(prompt),
            "Processing image generation request"
        );

        if let Err(e) = self.bot.reply_to(message, MSG_GENERATING).await {
            warn!(error = %e, "Failed to send generating notice");
        }

        let image = match self.generator.generate_image(prompt).await {
            Ok(image) => image,
            Err(e) if e.is_timeout() => {
                warn!(error = %e, "Image generation timed out");
                return self.send_fallback_and_stop(message, MSG_TIMEOUT).await;
            }
            Err(e) => {
                error!(error = %e, "Image generation failed");
                return self.send_fallback_and_stop(message, MSG_GENERATION_FAILED).await;
            }
        };

        let caption = format!("Generated from: {}", prompt);
        if let Err(e) = self
            .bot
            .send_photo(&message.chat, &image.url, Some(&caption))
            .await
        {
            error!(error = %e, "Failed to send photo");
            return self.send_fallback_and_stop(message, MSG_SEND_FAILED).await;
        }

        info!(
            chat_id = message.chat.id,
            image_url = %image.url,
            "Image generated and sent"
        );
        Ok(HandlerResponse::Stop)
    }

    async fn send_fallback_and_stop(&self, message: &Message, text: &str) -> Result<HandlerResponse> {
        if let Err(e) = self.bot.reply_to(message, text).await {
            error!(error = %e, "Failed to send fallback reply");
        }
        Ok(HandlerResponse::Stop)
    }
}

#[async_trait]
impl Handler for ImageGenerationHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let prompt = match self.prompt_request(message).await {
            PromptRequest::Prompt(p) => p,
            PromptRequest::Skip => {
                debug!(chat_id = message.chat.id, "Not an image request");
                return Ok(HandlerResponse::Continue);
            }
        };

        if prompt.trim().is_empty() {
            return self.send_fallback_and_stop(message, MSG_INVALID_PROMPT).await;
        }

        self.handle_image_generation(message, prompt.trim()).await
    }
}
