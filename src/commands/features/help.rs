use teloxide::{prelude::*, types::ParseMode, utils::command::BotCommands};

use crate::app_context::AppContext;
use crate::commands::command_def::DeckCommands;
use crate::commands::helpers::as_html_block;
use crate::deck::{TriggerDetector, TriggerMode};

const EXAMPLE_CODE: &str = "%%45|o0o5j4";

pub(crate) async fn handle_help(
    bot: &Bot,
    msg: &Message,
    app_context: &AppContext,
) -> ResponseResult<()> {
    let body = format!(
        "{}\n\n{}",
        usage_text(app_context.pipeline.detector()),
        DeckCommands::descriptions()
    );
    bot.send_message(msg.chat.id, as_html_block("Kards Deck Screenshots", &body))
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}

pub(crate) fn usage_text(detector: &TriggerDetector) -> String {
    match detector.mode() {
        TriggerMode::StrictPrefix => format!(
            "Send a message starting with {prefix} followed by a deck code, e.g. {prefix}{EXAMPLE_CODE}",
            prefix = detector.command_prefix()
        ),
        TriggerMode::Anywhere => format!(
            "Include a deck code anywhere in your message, e.g. my list: {EXAMPLE_CODE}"
        ),
        TriggerMode::MentionGated => match detector.account().username() {
            Some(username) => format!(
                "Mention @{username} together with a deck code, e.g. @{username} {EXAMPLE_CODE}"
            ),
            None => format!("Mention the bot together with a deck code, e.g. {EXAMPLE_CODE}"),
        },
    }
}
