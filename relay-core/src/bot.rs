//! Bot abstraction for sending text, media and menus.
//!
//! [`Bot`] is transport-agnostic; relay-telegram implements it with teloxide and tests substitute
//! recording mocks.

use crate::error::Result;
use crate::types::{Chat, Message};
use async_trait::async_trait;

/// Reply-keyboard layout: rows of button labels. Pressing a button sends its label as text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuLayout {
    pub rows: Vec<Vec<String>>,
}

impl MenuLayout {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Lays `labels` out `per_row` to a row; the last row may be shorter.
    pub fn from_labels<I, S>(labels: I, per_row: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let per_row = per_row.max(1);
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let rows = labels.chunks(per_row).map(|c| c.to_vec()).collect();
        Self { rows }
    }

    /// Appends one row; empty rows are dropped.
    pub fn push_row(&mut self, row: Vec<String>) {
        if !row.is_empty() {
            self.rows.push(row);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|r| r.is_empty())
    }

    /// All labels in row order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().flatten().map(String::as_str)
    }
}

/// Abstraction for sending messages. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;
    /// Sends a reply to the given message (same chat).
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()>;
    /// Sends a photo by URL; the transport fetches it.
    async fn send_photo(&self, chat: &Chat, image_url: &str, caption: Option<&str>) -> Result<()>;
    /// Sends a video by URL; the transport fetches it.
    async fn send_video(&self, chat: &Chat, video_url: &str, caption: Option<&str>) -> Result<()>;
    /// Sends a text message together with a reply keyboard.
    async fn send_menu(&self, chat: &Chat, text: &str, layout: &MenuLayout) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_labels_two_per_row() {
        let layout = MenuLayout::from_labels(["a", "b", "c"], 2);
        assert_eq!(
            layout.rows,
            vec![
                vec!["a".to_string(), "b".to_string()],
                vec!["c".to_string()]
            ]
        );
        assert_eq!(layout.labels().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_from_labels_zero_per_row_is_one() {
        let layout = MenuLayout::from_labels(["a", "b"], 0);
        assert_eq!(layout.rows.len(), 2);
    }

    #[test]
    fn test_push_row_skips_empty() {
        let mut layout = MenuLayout::default();
        assert!(layout.is_empty());
        layout.push_row(vec![]);
        assert!(layout.rows.is_empty());
        layout.push_row(vec!["x".to_string()]);
        assert!(!layout.is_empty());
    }
}
