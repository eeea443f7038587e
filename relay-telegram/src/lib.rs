//! # relay-telegram
//!
//! Telegram transport layer: adapters, [`relay_core::Bot`] implementation, minimal config and the
//! REPL runner. Handles only Telegram connectivity and handler-chain execution.

mod adapters;
mod bot_adapter;
mod config;
mod runner;

pub use adapters::{chat_type_of, TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use config::{build_teloxide_bot, TelegramConfig};
pub use runner::run_repl;
