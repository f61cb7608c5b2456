//! Squonk Radio bot
//!
//! Users link a Telegram group in a private chat, upload audio files for
//! it, and anyone in the group can play the collection back with `/play`.

mod config;
mod errors;
mod handlers;
mod health;
mod media;
mod radio;
mod tags;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use squonk_store::RegistryStore;
use squonk_types::{parse_group_registration, CallbackAction, Command};
use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::prelude::*;
use teloxide::types::{CallbackQuery, Me, Message};
use teloxide::update_listeners::Polling;
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::errors::BotErrorHandler;

/// Squonk Radio bot CLI
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/squonk-bot.toml")]
    config: String,

    /// Telegram bot token (overrides config file)
    #[arg(long, env = "BOT_TOKEN")]
    bot_token: Option<String>,

    /// Registry JSON file (overrides config file)
    #[arg(long, env = "SQUONK_DATA_FILE")]
    data_file: Option<PathBuf>,

    /// Health check server port (overrides config file)
    #[arg(long, env = "HEALTH_CHECK_PORT")]
    health_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "squonk_bot=debug,squonk_store=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Squonk Radio bot");

    let args = Args::parse();

    let mut config = if Path::new(&args.config).exists() {
        info!("Loading config from file: {}", args.config);
        Config::from_file(&args.config)?
    } else {
        info!("Config file not found, using environment variables");
        Config::from_env()?
    };

    if let Some(bot_token) = args.bot_token {
        config.telegram.bot_token = bot_token;
    }
    if let Some(data_file) = args.data_file {
        config.storage.data_file = data_file;
    }
    if let Some(port) = args.health_port {
        config.health.port = port;
    }
    config.validate().context("Invalid configuration")?;

    let store = RegistryStore::open(config.storage.data_file.clone());
    info!("Registry file: {}", store.path().display());

    let bot = Bot::new(&config.telegram.bot_token);

    let me = bot
        .get_me()
        .await
        .context("Failed to authenticate bot with Telegram")?;
    info!("Bot authenticated as: @{}", me.username());

    let health_state = health::AppState::new(Some(me.username().to_string()));

    if config.health.enabled {
        let health_state_clone = health_state.clone();
        let health_port = config.health.port;
        tokio::spawn(async move {
            if let Err(e) = health::start_health_server(health_state_clone, health_port).await {
                error!("Health check server error: {}", e);
            }
        });
    }

    let message_handler = Update::filter_message()
        .branch(
            dptree::filter_map(|msg: Message, me: Me| {
                msg.text()
                    .and_then(|text| Command::parse(text, Some(me.username())))
            })
            .endpoint(handlers::handle_command),
        )
        .branch(
            dptree::filter_map(|msg: Message| msg.text().and_then(parse_group_registration))
                .endpoint(handlers::handle_group_registration),
        )
        .branch(
            dptree::filter(|msg: Message| msg.audio().is_some())
                .endpoint(handlers::handle_audio),
        );

    let callback_handler = Update::filter_callback_query().branch(
        dptree::filter_map(|query: CallbackQuery| {
            query
                .data
                .as_deref()
                .and_then(CallbackAction::parse)
                .filter(|action| *action == CallbackAction::Playlist)
        })
        .endpoint(handlers::handle_playlist_callback),
    );

    let all_handlers = dptree::entry()
        .branch(message_handler)
        .branch(callback_handler);

    let polling = &config.telegram.polling;
    info!(
        "Starting bot in POLLING mode (timeout: {}s, limit: {})",
        polling.timeout, polling.limit
    );

    let mut listener = Polling::builder(bot.clone())
        .timeout(Duration::from_secs(u64::from(polling.timeout)))
        .limit(polling.limit.clamp(1, 100));
    if config.telegram.drop_pending_updates {
        listener = listener.drop_pending_updates();
    }
    let listener = listener.build();

    Dispatcher::builder(bot, all_handlers)
        .dependencies(dptree::deps![
            store,
            health_state.clone(),
            me,
            config.limits.clone()
        ])
        .default_handler(|upd| async move {
            debug!("Unhandled update: {:?}", upd.kind);
        })
        .error_handler(BotErrorHandler::new(health_state))
        .enable_ctrlc_handler()
        .build()
        .dispatch_with_listener(
            listener,
            LoggingErrorHandler::with_custom_text("An error from the update listener"),
        )
        .await;

    info!("Squonk Radio bot stopped");
    Ok(())
}
