//! # relay-cli
//!
//! Wires the three bots together: config from env, handler chains, REPL startup.

pub mod app;
pub mod cli;
pub mod config;

pub use app::{
    build_image_chain, build_instagram_chain, build_menu_chain, run_image, run_instagram,
    run_menu, BotContext,
};
pub use cli::{Cli, Commands};
pub use config::{parse_user_ids, BaseConfig, ImageProvider, ImageSettings, InstagramSettings};
