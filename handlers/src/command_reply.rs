//! Static replies to slash commands (`/start`, `/help`, ...).

use async_trait::async_trait;
use relay_core::{parse_command, Bot, Handler, HandlerResponse, Message, Result};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, instrument};

/// Replies with fixed text when the message is `/command` (optionally `/command@this_bot`).
pub struct CommandReplyHandler {
    bot: Arc<dyn Bot>,
    bot_username: Arc<RwLock<Option<String>>>,
    command: String,
    text: String,
}

impl CommandReplyHandler {
    /// `command` is given without the leading slash, e.g. `"start"`.
    pub fn new(
        bot: Arc<dyn Bot>,
        bot_username: Arc<RwLock<Option<String>>>,
        command: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            bot,
            bot_username,
            command: command.into().trim_start_matches('/').to_lowercase(),
            text: text.into(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }
}

#[async_trait]
impl Handler for CommandReplyHandler {
    #[instrument(skip(self, message), fields(command = %self.command))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let username = self.bot_username.read().await.clone();
        let matched = parse_command(&message.content, username.as_deref())
            .map(|cmd| cmd.is(&self.command))
            .unwrap_or(false);
        if !matched {
            return Ok(HandlerResponse::Continue);
        }

        info!(chat_id = message.chat.id, "Replying to command");
        self.bot.reply_to(message, &self.text).await?;
        Ok(HandlerResponse::Stop)
    }
}
