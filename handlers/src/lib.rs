//! # Shared handlers for the relay bots
//!
//! Logging, optional allow-list auth, and static replies to slash commands such as `/start`.

mod command_reply;
mod logging_auth;

#[cfg(test)]
mod test;

pub use command_reply::CommandReplyHandler;
pub use logging_auth::{AuthHandler, LoggingHandler};
