//! Wraps teloxide::Bot and implements [`relay_core::Bot`]. Production code sends through the
//! Telegram Bot API; tests substitute another Bot impl.

use async_trait::async_trait;
use relay_core::{Bot as CoreBot, Chat, MenuLayout, Message, RelayError, Result};
use teloxide::{
    prelude::*,
    types::{ChatId, InputFile, KeyboardButton, KeyboardMarkup},
};
use tracing::{error, instrument};

/// Thin wrapper around teloxide::Bot that implements relay-core's Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

/// Parses a media URL for [`InputFile::url`].
pub(crate) fn parse_media_url(url: &str) -> Result<reqwest::Url> {
    reqwest::Url::parse(url)
        .map_err(|e| RelayError::Bot(format!("Invalid media URL {}: {}", url, e)))
}

/// Converts a core layout into a resized reply keyboard.
pub(crate) fn keyboard_markup(layout: &MenuLayout) -> KeyboardMarkup {
    let rows = layout
        .rows
        .iter()
        .filter(|row| !row.is_empty())
        .map(|row| {
            row.iter()
                .map(|label| KeyboardButton::new(label.clone()))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    KeyboardMarkup::new(rows).resize_keyboard()
}

fn bot_error(e: teloxide::RequestError) -> RelayError {
    RelayError::Bot(e.to_string())
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(bot_error)?;
        Ok(())
    }

    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send_message(&message.chat, text).await
    }

    #[instrument(skip(self, chat, caption), fields(chat_id = chat.id))]
    async fn send_photo(&self, chat: &Chat, image_url: &str, caption: Option<&str>) -> Result<()> {
        let url = parse_media_url(image_url)?;
        let mut request = self.bot.send_photo(ChatId(chat.id), InputFile::url(url));
        if let Some(caption) = caption {
            request = request.caption(caption.to_string());
        }
        request.await.map_err(|e| {
            error!(error = %e, "sendPhoto failed");
            bot_error(e)
        })?;
        Ok(())
    }

    #[instrument(skip(self, chat, caption), fields(chat_id = chat.id))]
    async fn send_video(&self, chat: &Chat, video_url: &str, caption: Option<&str>) -> Result<()> {
        let url = parse_media_url(video_url)?;
        let mut request = self.bot.send_video(ChatId(chat.id), InputFile::url(url));
        if let Some(caption) = caption {
            request = request.caption(caption.to_string());
        }
        request.await.map_err(|e| {
            error!(error = %e, "sendVideo failed");
            bot_error(e)
        })?;
        Ok(())
    }

    async fn send_menu(&self, chat: &Chat, text: &str, layout: &MenuLayout) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .reply_markup(keyboard_markup(layout))
            .await
            .map_err(bot_error)?;
        Ok(())
    }
}
