mod app_context;
mod capabilities;
mod commands;
mod config;
mod deck;
mod delivery;
mod pipeline;
mod renderer;

use teloxide::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::app_context::AppContext;
use crate::capabilities::Capabilities;
use crate::commands::{DeckCommands, answer_command, answer_message};
use crate::config::{TriggerConfig, load_config};
use crate::deck::{BotAccount, TriggerMode};

fn init_json_logging() {
    if let Err(error) = tracing_log::LogTracer::init() {
        eprintln!(
            "logging bridge initialization failed (continuing with existing logger): {}",
            error
        );
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .json()
        .with_current_span(false)
        .with_span_list(false)
        .finish();

    if let Err(error) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("global logger initialization failed: {}", error);
    }
}

const CONFIG_PATH: &str = "config.toml";

fn log_capability_warnings(capabilities: &Capabilities) {
    if !capabilities.has_interpreter {
        log::warn!(
            "capability_degraded feature=renderer reason=interpreter_unavailable interpreter={}",
            capabilities.interpreter.as_deref().unwrap_or("none")
        );
    }

    if !capabilities.has_renderer {
        log::warn!("capability_degraded feature=renderer reason=renderer_path_missing");
    }

    if !capabilities.has_temp_dir {
        log::warn!("capability_degraded feature=renderer reason=temp_dir_missing");
    }
}

async fn resolve_bot_account(bot: &Bot, trigger: &TriggerConfig) -> BotAccount {
    match bot.get_me().await {
        Ok(me) => {
            let username = trigger
                .bot_username
                .clone()
                .or_else(|| me.user.username.clone());
            log::info!(
                "bot_identity_resolved user_id={} username={}",
                me.user.id.0,
                username.as_deref().unwrap_or("unknown")
            );
            BotAccount::new(username, Some(me.user.id.0))
        }
        Err(error) => {
            log::warn!(
                "bot_identity_degraded reason=get_me_failed error={}",
                error
            );
            BotAccount::new(trigger.bot_username.clone(), None)
        }
    }
}

// Main
#[tokio::main]
async fn main() {
    init_json_logging();

    let config = match load_config(CONFIG_PATH) {
        Ok(config) => config,
        Err(error) => {
            log::error!("Configuration error: {}", error);
            return;
        }
    };

    log::info!("Deck screenshot bot is starting...");
    let capabilities = Capabilities::detect(&config.renderer);
    log_capability_warnings(&capabilities);

    let bot = Bot::new(&config.bot_token);
    let account = resolve_bot_account(&bot, &config.trigger).await;
    if config.trigger.mode == TriggerMode::MentionGated
        && account.username().is_none()
        && account.user_id().is_none()
    {
        log::warn!("capability_degraded feature=mention_gate reason=bot_identity_unknown");
    }

    let app_context = match AppContext::new(&config, account) {
        Ok(app_context) => app_context,
        Err(error) => {
            log::error!("Pipeline initialization failed: {}", error);
            return;
        }
    };

    log::info!(
        "deck_trigger_configured mode={} command_prefix={:?} timeout_secs={}",
        config.trigger.mode.as_str(),
        config.trigger.command_prefix,
        config.renderer.timeout_seconds
    );

    let handler = Update::filter_message()
        .branch(
            dptree::entry()
                .filter_command::<DeckCommands>()
                .endpoint(answer_command),
        )
        .branch(dptree::endpoint(answer_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![app_context])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    log::info!("Deck screenshot bot stopped");
}
