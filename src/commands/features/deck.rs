use teloxide::{prelude::*, types::InputFile};

use crate::app_context::AppContext;
use crate::deck::{DeckCode, InboundMessage};
use crate::delivery::{DECK_SCREENSHOT_FAILED_TEXT, Outcome};

const DECK_COMMAND_USAGE_TEXT: &str = "Usage: /deck <deck code>, e.g. /deck %%45|o0o5j4";

pub(crate) async fn handle_deck_message(
    bot: &Bot,
    msg: &Message,
    app_context: &AppContext,
) -> ResponseResult<()> {
    let inbound = InboundMessage::from_message(msg);
    let Some(outcome) = app_context.pipeline.process(&inbound).await else {
        return Ok(());
    };

    reply_with_outcome(bot, msg, outcome).await
}

pub(crate) async fn handle_deck_command(
    bot: &Bot,
    msg: &Message,
    app_context: &AppContext,
    argument: &str,
) -> ResponseResult<()> {
    let Some(code) = app_context.pipeline.detector().extract_code(argument) else {
        bot.send_message(msg.chat.id, DECK_COMMAND_USAGE_TEXT)
            .reply_to_message_id(msg.id)
            .await?;
        return Ok(());
    };

    render_and_reply(bot, msg, app_context, &code).await
}

async fn render_and_reply(
    bot: &Bot,
    msg: &Message,
    app_context: &AppContext,
    code: &DeckCode,
) -> ResponseResult<()> {
    let outcome = app_context.pipeline.render_and_deliver(code).await;
    reply_with_outcome(bot, msg, outcome).await
}

async fn reply_with_outcome(bot: &Bot, msg: &Message, outcome: Outcome) -> ResponseResult<()> {
    match outcome {
        Outcome::Image { bytes, file_name } => {
            bot.send_photo(msg.chat.id, InputFile::memory(bytes).file_name(file_name))
                .reply_to_message_id(msg.id)
                .await?;
        }
        Outcome::Failure { code } => {
            log::info!(
                "deck_reply_failure_sent chat_id={} message_id={} reason={}",
                msg.chat.id.0,
                msg.id.0,
                code
            );
            bot.send_message(msg.chat.id, DECK_SCREENSHOT_FAILED_TEXT)
                .reply_to_message_id(msg.id)
                .await?;
        }
    }

    Ok(())
}
