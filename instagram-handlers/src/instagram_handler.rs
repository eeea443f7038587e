//! Instagram handler: resolve every post link in a message and send its media back.

use async_trait::async_trait;
use instagram_client::{extract_instagram_urls, InstagramClient, MediaItem};
use relay_core::{Bot, Handler, HandlerResponse, Message, Result};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

use crate::messages::{download_failed, MSG_SEND_FAILED, MSG_UNEXPECTED_ERROR};

/// Telegram rejects media captions longer than this.
pub const MAX_CAPTION_CHARS: usize = 1024;

/// Cuts a caption to [`MAX_CAPTION_CHARS`] characters, ending with `…` when cut.
pub fn truncate_caption(caption: &str) -> String {
    if caption.chars().count() <= MAX_CAPTION_CHARS {
        return caption.to_string();
    }
    let mut cut: String = caption.chars().take(MAX_CAPTION_CHARS - 1).collect();
    cut.push('…');
    cut
}

/// Handles plain-text messages containing Instagram post, reel or TV links. Commands and messages
/// without links pass through with Continue.
#[derive(Clone)]
pub struct InstagramHandler {
    client: Arc<InstagramClient>,
    bot: Arc<dyn Bot>,
}

impl InstagramHandler {
    pub fn new(client: Arc<InstagramClient>, bot: Arc<dyn Bot>) -> Self {
        Self { client, bot }
    }

    async fn send_fallback(&self, message: &Message, text: &str) {
        if let Err(e) = self.bot.reply_to(message, text).await {
            error!(error = %e, chat_id = message.chat.id, "Failed to send fallback reply");
        }
    }

    #[instrument(skip(self, message), fields(chat_id = message.chat.id))]
    async fn send_media_for_url(&self, message: &Message, url: &str) {
        info!(url = %url, "Processing Instagram URL");

        let media = match self.client.fetch_media(url).await {
            Ok(media) => media,
            Err(e) if e.is_transport() => {
                error!(error = %e, url = %url, "Unexpected error while fetching Instagram media");
                self.send_fallback(message, MSG_UNEXPECTED_ERROR).await;
                return;
            }
            Err(e) => {
                warn!(error = %e, url = %url, "Instagram media unavailable");
                self.send_fallback(message, &download_failed(&e.to_string())).await;
                return;
            }
        };

        self.send_media_items(message, &media).await;
    }

    /// The first item with a caption carries it; the rest go without. A send failure stops the
    /// remaining items of this post.
    async fn send_media_items(&self, message: &Message, media: &[MediaItem]) {
        let mut caption_sent = false;
        for item in media {
            let caption = if caption_sent {
                None
            } else {
                item.caption.as_deref().map(truncate_caption)
            };

            let sent = if item.is_video() {
                self.bot
                    .send_video(&message.chat, &item.url, caption.as_deref())
                    .await
            } else {
                self.bot
                    .send_photo(&message.chat, &item.url, caption.as_deref())
                    .await
            };

            if let Err(e) = sent {
                error!(error = %e, media_url = %item.url, "Failed to send media to Telegram");
                self.send_fallback(message, MSG_SEND_FAILED).await;
                return;
            }
            caption_sent = caption_sent || caption.is_some();
        }
    }
}

#[async_trait]
impl Handler for InstagramHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if message.is_command() {
            return Ok(HandlerResponse::Continue);
        }

        let urls = extract_instagram_urls(&message.content);
        if urls.is_empty() {
            debug!(chat_id = message.chat.id, "No Instagram URLs detected in message");
            return Ok(HandlerResponse::Continue);
        }

        for url in &urls {
            self.send_media_for_url(message, url).await;
        }

        info!(
            chat_id = message.chat.id,
            url_count = urls.len(),
            "Instagram message handled"
        );
        Ok(HandlerResponse::Stop)
    }
}
