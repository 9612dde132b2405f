use teloxide::prelude::*;

use super::command_def::DeckCommands;
use super::features::deck::handle_deck_message;
use super::router::route_command;
use crate::app_context::AppContext;

pub async fn answer_command(
    bot: Bot,
    msg: Message,
    cmd: DeckCommands,
    app_context: AppContext,
) -> ResponseResult<()> {
    route_command(bot, msg, cmd, &app_context).await
}

pub async fn answer_message(
    bot: Bot,
    msg: Message,
    app_context: AppContext,
) -> ResponseResult<()> {
    if msg.from().is_some_and(|user| user.is_bot) {
        return Ok(());
    }

    handle_deck_message(&bot, &msg, &app_context).await
}
