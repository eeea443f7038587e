//! relaybot: run one of the relay bots. Config from env (.env supported) and optional CLI args.

use anyhow::Result;
use clap::Parser;
use relay_cli::{run_image, run_instagram, run_menu, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Instagram { token } => run_instagram(token).await,
        Commands::Menu { token } => run_menu(token).await,
        Commands::Image { token, provider } => run_image(token, provider).await,
    }
}
