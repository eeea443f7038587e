//! Bot assembly: handler chains per bot and the `run_*` entry points behind each subcommand.
//!
//! Chains are built against `Arc<dyn Bot>` so tests can drive them with a recording bot and no
//! network; the `run_*` functions add config, tracing and the teloxide REPL around them.

use anyhow::{Context, Result};
use handler_chain::HandlerChain;
use handlers::{AuthHandler, CommandReplyHandler, LoggingHandler};
use image_generation_client::ImageGenerator;
use image_handlers::ImageGenerationHandler;
use instagram_client::InstagramClient;
use instagram_handlers::{messages as instagram_messages, InstagramHandler};
use menu_handlers::{MenuHandler, MenuTree};
use relay_core::{init_tracing, Bot};
use relay_telegram::{build_teloxide_bot, run_repl, TelegramBotAdapter};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use crate::config::{BaseConfig, ImageProvider, ImageSettings, InstagramSettings};

const IMAGE_START_TEXT: &str = "Hi! Send me a description and I will draw it.\n\
    In groups, mention me or use /image <prompt>.";
const IMAGE_HELP_TEXT: &str = "Usage:\n/image <prompt> or /draw <prompt>\n\
    In private chats any text is used as the prompt.";
const MENU_HELP_TEXT: &str = "Use /menu to open the main menu, then navigate with the buttons.";

/// Outbound bot plus the username cache filled by getMe at startup.
#[derive(Clone)]
pub struct BotContext {
    pub bot: Arc<dyn Bot>,
    pub bot_username: Arc<RwLock<Option<String>>>,
}

impl BotContext {
    pub fn new(bot: Arc<dyn Bot>) -> Self {
        Self {
            bot,
            bot_username: Arc::new(RwLock::new(None)),
        }
    }

    fn command_reply(&self, command: &str, text: &str) -> Arc<CommandReplyHandler> {
        Arc::new(CommandReplyHandler::new(
            self.bot.clone(),
            self.bot_username.clone(),
            command,
            text,
        ))
    }
}

/// Logging, then the allowlist, then one fixed reply per `(command, text)`.
fn base_chain(allowed_user_ids: &[i64], ctx: &BotContext, replies: &[(&str, &str)]) -> HandlerChain {
    let mut chain = HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(AuthHandler::new(allowed_user_ids.to_vec())));
    for (command, text) in replies {
        chain = chain.add_handler(ctx.command_reply(command, text));
    }
    chain
}

pub fn build_instagram_chain(
    allowed_user_ids: &[i64],
    ctx: &BotContext,
    client: Arc<InstagramClient>,
) -> HandlerChain {
    base_chain(
        allowed_user_ids,
        ctx,
        &[
            ("start", instagram_messages::START_TEXT),
            ("help", instagram_messages::HELP_TEXT),
        ],
    )
    .add_handler(Arc::new(InstagramHandler::new(client, ctx.bot.clone())))
}

/// `/start` and `/menu` are answered by the menu itself so they come with the keyboard.
pub fn build_menu_chain(allowed_user_ids: &[i64], ctx: &BotContext, tree: MenuTree) -> HandlerChain {
    base_chain(allowed_user_ids, ctx, &[("help", MENU_HELP_TEXT)]).add_handler(Arc::new(
        MenuHandler::new(ctx.bot.clone(), ctx.bot_username.clone(), tree),
    ))
}

pub fn build_image_chain(
    allowed_user_ids: &[i64],
    ctx: &BotContext,
    generator: Arc<dyn ImageGenerator>,
) -> HandlerChain {
    base_chain(
        allowed_user_ids,
        ctx,
        &[("start", IMAGE_START_TEXT), ("help", IMAGE_HELP_TEXT)],
    )
    .add_handler(Arc::new(ImageGenerationHandler::new(
        ctx.bot_username.clone(),
        generator,
        ctx.bot.clone(),
    )))
}

/// Loads base config, starts tracing and builds the teloxide bot with its adapter.
fn start(token: Option<String>, bot_name: &str) -> Result<(BaseConfig, teloxide::Bot, BotContext)> {
    let config = BaseConfig::load(token, bot_name)?;
    init_tracing(&config.log_file)
        .with_context(|| format!("Failed to initialise logging at {}", config.log_file))?;

    let teloxide_bot = build_teloxide_bot(&config.telegram);
    let ctx = BotContext::new(Arc::new(TelegramBotAdapter::new(teloxide_bot.clone())));

    info!(
        bot = bot_name,
        log_file = %config.log_file,
        allowlist_size = config.allowed_user_ids.len(),
        "Initializing bot"
    );
    Ok((config, teloxide_bot, ctx))
}

pub async fn run_instagram(token: Option<String>) -> Result<()> {
    let (config, teloxide_bot, ctx) = start(token, "instagram")?;

    let settings = InstagramSettings::from_env()?;
    let client = InstagramClient::with_config(settings.client_config())
        .context("Failed to build Instagram client")?;
    info!(base_url = %settings.base_url, timeout_secs = settings.timeout.as_secs(), "Instagram client ready");

    let chain = build_instagram_chain(&config.allowed_user_ids, &ctx, Arc::new(client));
    run_repl(teloxide_bot, chain, ctx.bot_username.clone()).await
}

pub async fn run_menu(token: Option<String>) -> Result<()> {
    let (config, teloxide_bot, ctx) = start(token, "menu")?;

    let chain = build_menu_chain(&config.allowed_user_ids, &ctx, MenuTree::default_tree());
    run_repl(teloxide_bot, chain, ctx.bot_username.clone()).await
}

pub async fn run_image(token: Option<String>, provider: Option<ImageProvider>) -> Result<()> {
    let (config, teloxide_bot, ctx) = start(token, "image")?;

    let settings = ImageSettings::from_env(provider)?;
    let generator = settings.build_generator()?;
    info!(
        provider = generator.name(),
        model = settings.model.as_deref().unwrap_or("default"),
        "Image generator ready"
    );

    let chain = build_image_chain(&config.allowed_user_ids, &ctx, generator);
    run_repl(teloxide_bot, chain, ctx.bot_username.clone()).await
}
