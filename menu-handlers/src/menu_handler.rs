//! Menu handler: answers every message with a menu page and its keyboard.

use async_trait::async_trait;
use relay_core::{parse_command, Bot, Handler, HandlerResponse, Message, Result};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use crate::tree::{MenuNode, MenuTree};

pub const UNKNOWN_TEXT_HINT: &str = "Sorry, I didn't get that. Please use the menu buttons below.";

/// Navigation is stateless: every button label identifies its target page on its own.
pub struct MenuHandler {
    bot: Arc<dyn Bot>,
    bot_username: Arc<RwLock<Option<String>>>,
    tree: MenuTree,
}

impl MenuHandler {
    pub fn new(
        bot: Arc<dyn Bot>,
        bot_username: Arc<RwLock<Option<String>>>,
        tree: MenuTree,
    ) -> Self {
        Self {
            bot,
            bot_username,
            tree,
        }
    }

    async fn show(&self, message: &Message, node: &MenuNode) -> Result<()> {
        let layout = self.tree.layout_for(node);
        self.bot.send_menu(&message.chat, &node.body, &layout).await
    }

    async fn resolve(&self, message: &Message) -> Option<&MenuNode> {
        let text = message.content.trim();
        let username = self.bot_username.read().await.clone();
        if let Some(cmd) = parse_command(text, username.as_deref()) {
            return (cmd.is("start") || cmd.is("menu")).then(|| self.tree.root());
        }
        self.tree
            .find(text)
            .or_else(|| self.tree.find_back_target(text))
    }
}

#[async_trait]
impl Handler for MenuHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        match self.resolve(message).await {
            Some(node) => {
                info!(chat_id = message.chat.id, page = %node.title, "Showing menu page");
                self.show(message, node).await?;
            }
            None => {
                debug!(chat_id = message.chat.id, "Unrecognised menu input");
                self.bot
                    .send_menu(&message.chat, UNKNOWN_TEXT_HINT, &self.tree.root_layout())
                    .await?;
            }
        }
        Ok(HandlerResponse::Stop)
    }
}
