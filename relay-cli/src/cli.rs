//! CLI parser.

use clap::{Parser, Subcommand};

use crate::config::ImageProvider;

#[derive(Parser)]
#[command(name = "relaybot")]
#[command(about = "Telegram relay bots: Instagram downloader, menu, image generation", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send back the media behind Instagram post and reel links.
    Instagram {
        /// Overrides BOT_TOKEN / TELEGRAM_BOT_TOKEN.
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Serve the static navigation menu.
    Menu {
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Generate images from text prompts.
    Image {
        #[arg(short, long)]
        token: Option<String>,
        /// Overrides IMAGE_PROVIDER.
        #[arg(short, long, value_enum)]
        provider: Option<ImageProvider>,
    },
}
