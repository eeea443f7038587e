//! # relay-core
//!
//! Core types and traits shared by the relay bots: [`Bot`], [`Handler`], message and user types,
//! command parsing and tracing initialization. Transport-agnostic; used by relay-telegram,
//! handler-chain and every bot front-end.

pub mod bot;
pub mod command;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{Bot, MenuLayout};
pub use command::{parse_command, Command};
pub use error::{HandlerError, RelayError, Result};
pub use logger::init_tracing;
pub use types::{
    Chat, Handler, HandlerResponse, Message, MessageDirection, ToCoreMessage, ToCoreUser, User,
};
