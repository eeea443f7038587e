//! Instagram bot front-end: finds post/reel links in messages and sends the media back.

mod instagram_handler;
pub mod messages;

pub use instagram_handler::{truncate_caption, InstagramHandler, MAX_CAPTION_CHARS};
