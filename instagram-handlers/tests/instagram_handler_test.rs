//! InstagramHandler against a mockito metadata server and a recording bot.

use async_trait::async_trait;
use chrono::Utc;
use instagram_client::{InstagramClient, InstagramConfig};
use instagram_handlers::messages::{MSG_SEND_FAILED, MSG_UNEXPECTED_ERROR};
use instagram_handlers::InstagramHandler;
use mockito::Matcher;
use relay_core::{
    Bot, Chat, Handler, HandlerResponse, MenuLayout, Message, MessageDirection, RelayError, Result,
    User,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
enum Sent {
    Text(String),
    Photo(String, Option<String>),
    Video(String, Option<String>),
}

#[derive(Default)]
struct RecordingBot {
    sent: Mutex<Vec<Sent>>,
    fail_media: bool,
}

impl RecordingBot {
    fn failing_media() -> Self {
        Self {
            fail_media: true,
            ..Self::default()
        }
    }

    fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    fn media(&self, sent: Sent) -> Result<()> {
        if self.fail_media {
            return Err(RelayError::Bot("upload rejected".to_string()));
        }
        self.sent.lock().unwrap().push(sent);
        Ok(())
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn send_message(&self, _chat: &Chat, text: &str) -> Result<()> {
        self.sent.lock().unwrap().push(Sent::Text(text.to_string()));
        Ok(())
    }
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send_message(&message.chat, text).await
    }
    async fn send_photo(&self, _chat: &Chat, url: &str, caption: Option<&str>) -> Result<()> {
        self.media(Sent::Photo(url.to_string(), caption.map(String::from)))
    }
    async fn send_video(&self, _chat: &Chat, url: &str, caption: Option<&str>) -> Result<()> {
        self.media(Sent::Video(url.to_string(), caption.map(String::from)))
    }
    async fn send_menu(&self, chat: &Chat, text: &str, _layout: &MenuLayout) -> Result<()> {
        self.send_message(chat, text).await
    }
}

fn message(content: &str) -> Message {
    Message {
        id: "1".to_string(),
        user: User {
            id: 42,
            username: Some("alice".to_string()),
            first_name: Some("Alice".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: 100,
            chat_type: "private".to_string(),
        },
        content: content.to_string(),
        message_type: "text".to_string(),
        direction: MessageDirection::Incoming,
        created_at: Utc::now(),
    }
}

fn handler_for(base_url: String, bot: Arc<RecordingBot>) -> InstagramHandler {
    let client = InstagramClient::with_config(InstagramConfig {
        base_url,
        timeout: Duration::from_secs(5),
        ..InstagramConfig::default()
    })
    .unwrap();
    InstagramHandler::new(Arc::new(client), bot)
}

const CAROUSEL: &str = r#"{"graphql": {"shortcode_media": {
    "edge_media_to_caption": {"edges": [{"node": {"text": "trip"}}]},
    "edge_sidecar_to_children": {"edges": [
        {"node": {"is_video": false, "display_url": "https://cdn.example.com/1.jpg"}},
        {"node": {"is_video": true, "video_url": "https://cdn.example.com/2.mp4"}}
    ]}
}}}"#;

/// **Test: carousel items are sent in order, only the first carries the caption.**
#[tokio::test]
async fn test_carousel_sends_each_item_with_caption_once() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/p/CAR1/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(CAROUSEL)
        .create_async()
        .await;

    let bot = Arc::new(RecordingBot::default());
    let handler = handler_for(server.url(), bot.clone());

    let response = handler
        .handle(&message("look https://www.instagram.com/p/CAR1/"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response, HandlerResponse::Stop);
    assert_eq!(
        bot.sent(),
        vec![
            Sent::Photo(
                "https://cdn.example.com/1.jpg".to_string(),
                Some("trip".to_string())
            ),
            Sent::Video("https://cdn.example.com/2.mp4".to_string(), None),
        ]
    );
}

/// **Test: rejected metadata request replies with the download-failed text and the reason.**
#[tokio::test]
async fn test_unavailable_post_replies_with_reason() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/reel/GONE/")
        .match_query(Matcher::Any)
        .with_status(404)
        .create_async()
        .await;

    let bot = Arc::new(RecordingBot::default());
    let handler = handler_for(server.url(), bot.clone());

    let response = handler
        .handle(&message("https://instagram.com/reel/GONE"))
        .await
        .unwrap();

    assert_eq!(response, HandlerResponse::Stop);
    let sent = bot.sent();
    assert_eq!(sent.len(), 1);
    match &sent[0] {
        Sent::Text(text) => {
            assert!(text.starts_with("⚠️"));
            assert!(text.contains("private or unavailable"));
            assert!(!text.contains("404"));
        }
        other => panic!("expected text reply, got {:?}", other),
    }
}

/// **Test: Instagram links that are not posts (stories, profiles) are ignored without a request.**
#[tokio::test]
async fn test_non_post_links_make_no_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let bot = Arc::new(RecordingBot::default());
    let handler = handler_for(server.url(), bot.clone());

    let response = handler
        .handle(&message(
            "https://www.instagram.com/stories/someone/ https://instagram.com/someone",
        ))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response, HandlerResponse::Continue);
    assert!(bot.sent().is_empty());
}

/// **Test: network failure replies with the generic unexpected-error text.**
#[tokio::test]
async fn test_transport_error_replies_unexpected() {
    let bot = Arc::new(RecordingBot::default());
    let handler = handler_for("http://127.0.0.1:1".to_string(), bot.clone());

    let response = handler
        .handle(&message("https://www.instagram.com/p/ABC/"))
        .await
        .unwrap();

    assert_eq!(response, HandlerResponse::Stop);
    assert_eq!(bot.sent(), vec![Sent::Text(MSG_UNEXPECTED_ERROR.to_string())]);
}

/// **Test: failed upload replies once with the send-failure text and skips the rest of the post.**
#[tokio::test]
async fn test_send_failure_stops_remaining_items() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/p/CAR1/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(CAROUSEL)
        .create_async()
        .await;

    let bot = Arc::new(RecordingBot::failing_media());
    let handler = handler_for(server.url(), bot.clone());

    handler
        .handle(&message("https://www.instagram.com/p/CAR1/"))
        .await
        .unwrap();

    assert_eq!(bot.sent(), vec![Sent::Text(MSG_SEND_FAILED.to_string())]);
}

/// **Test: every distinct link in a message is processed in order.**
#[tokio::test]
async fn test_multiple_links_each_processed() {
    let mut server = mockito::Server::new_async().await;
    let _first = server
        .mock("GET", "/p/ONE/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            r#"{"graphql": {"shortcode_media": {"display_url": "https://cdn.example.com/one.jpg"}}}"#,
        )
        .create_async()
        .await;
    let _second = server
        .mock("GET", "/p/TWO/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            r#"{"graphql": {"shortcode_media": {"display_url": "https://cdn.example.com/two.jpg"}}}"#,
        )
        .create_async()
        .await;

    let bot = Arc::new(RecordingBot::default());
    let handler = handler_for(server.url(), bot.clone());

    handler
        .handle(&message(
            "https://instagram.com/p/ONE/ and https://instagram.com/p/TWO/",
        ))
        .await
        .unwrap();

    assert_eq!(
        bot.sent(),
        vec![
            Sent::Photo("https://cdn.example.com/one.jpg".to_string(), None),
            Sent::Photo("https://cdn.example.com/two.jpg".to_string(), None),
        ]
    );
}

/// **Test: a link sent twice in one message is fetched and sent twice.**
#[tokio::test]
async fn test_repeated_link_processed_each_time() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/p/TWICE/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            r#"{"graphql": {"shortcode_media": {"display_url": "https://cdn.example.com/t.jpg"}}}"#,
        )
        .expect(2)
        .create_async()
        .await;

    let bot = Arc::new(RecordingBot::default());
    let handler = handler_for(server.url(), bot.clone());

    handler
        .handle(&message(
            "https://instagram.com/p/TWICE/ again https://www.instagram.com/p/TWICE/?igsh=1",
        ))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(bot.sent().len(), 2);
}

/// **Test: commands and link-free text are left for other handlers.**
#[tokio::test]
async fn test_commands_and_plain_text_continue() {
    let bot = Arc::new(RecordingBot::default());
    let handler = handler_for("http://127.0.0.1:1".to_string(), bot.clone());

    for text in ["/start", "hello there", "https://example.com/p/ABC/"] {
        let response = handler.handle(&message(text)).await.unwrap();
        assert_eq!(response, HandlerResponse::Continue, "text: {}", text);
    }
    assert!(bot.sent().is_empty());
}
