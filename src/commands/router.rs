use teloxide::prelude::*;

use crate::app_context::AppContext;

use super::command_def::DeckCommands;
use super::features::{deck::handle_deck_command, help::handle_help};

pub(super) async fn route_command(
    bot: Bot,
    msg: Message,
    cmd: DeckCommands,
    app_context: &AppContext,
) -> ResponseResult<()> {
    match cmd {
        DeckCommands::Help | DeckCommands::Start => handle_help(&bot, &msg, app_context).await?,
        DeckCommands::Deck(argument) => {
            handle_deck_command(&bot, &msg, app_context, &argument).await?
        }
    }

    Ok(())
}
