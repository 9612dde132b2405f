use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum DeckCommands {
    #[command(description = "Show how to request a deck screenshot.")]
    Help,
    #[command(description = "Show how to request a deck screenshot.")]
    Start,
    #[command(description = "Render a deck code, e.g. /deck %%45|o0o5j4")]
    Deck(String),
}
