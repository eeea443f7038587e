
use async_trait::async_trait;
use chrono::Utc;
use relay_core::{Bot, Chat, MenuLayout, Message, MessageDirection, Result, User};
use std::sync::Mutex;

pub(crate) fn sample_message(user_id: i64, content: &str) -> Message {
    Message {
        id: "msg-1".to_string(),
        user: User {
            id: user_id,
            username: Some("testuser".to_string()),
            first_name: Some("Test".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: 123,
            chat_type: "private".to_string(),
        },
        content: content.to_string(),
        message_type: "text".to_string(),
        direction: MessageDirection::Incoming,
        created_at: Utc::now(),
    }
}

/// Records every text sent through it.
#[derive(Default)]
pub(crate) struct RecordingBot {
    pub texts: Mutex<Vec<(i64, String)>>,
}

#[async_trait]
impl Bot for RecordingBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.texts.lock().unwrap().push((chat.id, text.to_string()));
        Ok(())
    }
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send_message(&message.chat, text).await
    }
    async fn send_photo(&self, _chat: &Chat, _image_url: &str, _caption: Option<&str>) -> Result<()> {
        Ok(())
    }
    async fn send_video(&self, _chat: &Chat, _video_url: &str, _caption: Option<&str>) -> Result<()> {
        Ok(())
    }
    async fn send_menu(&self, chat: &Chat, text: &str, _layout: &MenuLayout) -> Result<()> {
        self.send_message(chat, text).await
    }
}
