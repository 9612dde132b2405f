mod mention;
mod trigger;
mod url;

pub use mention::{BotAccount, InboundMessage};
pub use trigger::{DeckCode, TriggerDetector, TriggerMode};
pub use url::build_deck_url;
