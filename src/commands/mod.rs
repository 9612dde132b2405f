mod command_def;
mod features;
mod handler;
mod helpers;
mod router;

pub use command_def::DeckCommands;
pub use handler::{answer_command, answer_message};
