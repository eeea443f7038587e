//! End-to-end chain wiring with a recording bot: no Telegram, no upstream services.

use async_trait::async_trait;
use chrono::Utc;
use image_generation_client::{GeneratedImage, ImageGenerationError, ImageGenerator};
use instagram_client::{InstagramClient, InstagramConfig};
use instagram_handlers::messages::{HELP_TEXT, START_TEXT};
use menu_handlers::MenuTree;
use relay_cli::{build_image_chain, build_instagram_chain, build_menu_chain, BotContext};
use relay_core::{
    Bot, Chat, HandlerError, HandlerResponse, MenuLayout, Message, MessageDirection, RelayError,
    Result, User,
};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct RecordingBot {
    texts: Mutex<Vec<String>>,
    menus: Mutex<Vec<String>>,
    photos: Mutex<Vec<(String, Option<String>)>>,
}

#[async_trait]
impl Bot for RecordingBot {
    async fn send_message(&self, _chat: &Chat, text: &str) -> Result<()> {
        self.texts.lock().unwrap().push(text.to_string());
        Ok(())
    }
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send_message(&message.chat, text).await
    }
    async fn send_photo(&self, _chat: &Chat, url: &str, caption: Option<&str>) -> Result<()> {
        self.photos
            .lock()
            .unwrap()
            .push((url.to_string(), caption.map(String::from)));
        Ok(())
    }
    async fn send_video(&self, _chat: &Chat, _url: &str, _caption: Option<&str>) -> Result<()> {
        Ok(())
    }
    async fn send_menu(&self, _chat: &Chat, text: &str, _layout: &MenuLayout) -> Result<()> {
        self.menus.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

struct FixedGenerator;

#[async_trait]
impl ImageGenerator for FixedGenerator {
    fn name(&self) -> &'static str {
        "fixed"
    }

    async fn generate_image(
        &self,
        prompt: &str,
    ) -> std::result::Result<GeneratedImage, ImageGenerationError> {
        Ok(GeneratedImage {
            url: "https://img.example.com/fixed.png".to_string(),
            prompt: prompt.to_string(),
        })
    }
}

fn message(user_id: i64, content: &str) -> Message {
    Message {
        id: "1".to_string(),
        user: User {
            id: user_id,
            username: None,
            first_name: None,
            last_name: None,
        },
        chat: Chat {
            id: 900,
            chat_type: "private".to_string(),
        },
        content: content.to_string(),
        message_type: "text".to_string(),
        direction: MessageDirection::Incoming,
        created_at: Utc::now(),
    }
}

fn context() -> (BotContext, Arc<RecordingBot>) {
    let bot = Arc::new(RecordingBot::default());
    (BotContext::new(bot.clone()), bot)
}

fn offline_instagram_client() -> Arc<InstagramClient> {
    let client = InstagramClient::with_config(InstagramConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        ..InstagramConfig::default()
    })
    .unwrap();
    Arc::new(client)
}

/// **Test: instagram bot answers /start and /help with the fixed texts.**
#[tokio::test]
async fn test_instagram_chain_start_and_help() {
    let (ctx, bot) = context();
    let chain = build_instagram_chain(&[], &ctx, offline_instagram_client());

    assert_eq!(chain.len(), 5);
    assert_eq!(
        chain.handle(&message(1, "/start")).await.unwrap(),
        HandlerResponse::Stop
    );
    chain.handle(&message(1, "/help")).await.unwrap();

    assert_eq!(
        *bot.texts.lock().unwrap(),
        vec![START_TEXT.to_string(), HELP_TEXT.to_string()]
    );
}

/// **Test: users outside a non-empty allowlist are rejected before any handler runs.**
#[tokio::test]
async fn test_allowlist_rejects_unknown_user() {
    let (ctx, bot) = context();
    let chain = build_instagram_chain(&[42], &ctx, offline_instagram_client());

    let err = chain.handle(&message(7, "/start")).await.unwrap_err();
    assert!(matches!(err, RelayError::Handler(HandlerError::Unauthorized)));
    assert!(bot.texts.lock().unwrap().is_empty());

    chain.handle(&message(42, "/start")).await.unwrap();
    assert_eq!(bot.texts.lock().unwrap().len(), 1);
}

/// **Test: menu bot opens the root menu on /start and answers /help with text.**
#[tokio::test]
async fn test_menu_chain() {
    let (ctx, bot) = context();
    let tree = MenuTree::default_tree();
    let chain = build_menu_chain(&[], &ctx, tree.clone());

    chain.handle(&message(1, "/start")).await.unwrap();
    chain.handle(&message(1, "/help")).await.unwrap();

    assert_eq!(*bot.menus.lock().unwrap(), vec![tree.root().body.clone()]);
    assert_eq!(bot.texts.lock().unwrap().len(), 1);
}

/// **Test: image bot turns private text into a captioned photo.**
#[tokio::test]
async fn test_image_chain_generates_photo() {
    let (ctx, bot) = context();
    let chain = build_image_chain(&[], &ctx, Arc::new(FixedGenerator));

    let response = chain.handle(&message(1, "a lighthouse")).await.unwrap();

    assert_eq!(response, HandlerResponse::Stop);
    assert_eq!(
        *bot.photos.lock().unwrap(),
        vec![(
            "https://img.example.com/fixed.png".to_string(),
            Some("Generated from: a lighthouse".to_string())
        )]
    );
}
