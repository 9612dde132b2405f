use super::schema::{RendererConfig, TriggerConfig};
use crate::deck::TriggerMode;

pub(super) fn default_trigger_mode() -> TriggerMode {
    TriggerMode::StrictPrefix
}

pub(super) fn default_command_prefix() -> String {
    "!".to_string()
}

pub(super) fn default_code_pattern() -> String {
    "%%[A-Za-z0-9|;]+".to_string()
}

pub(super) fn default_base_url() -> String {
    "https://www.kards.com/decks/deck-builder?hash=".to_string()
}

pub(super) fn default_interpreter() -> Option<String> {
    Some("node".to_string())
}

pub(super) fn default_renderer_path() -> String {
    "scripts/deck-screenshot.js".to_string()
}

pub(super) fn default_timeout_seconds() -> u64 {
    60
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            mode: default_trigger_mode(),
            command_prefix: default_command_prefix(),
            code_pattern: default_code_pattern(),
            bot_username: None,
        }
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            interpreter: default_interpreter(),
            renderer_path: default_renderer_path(),
            timeout_seconds: default_timeout_seconds(),
            percent_encode_code: false,
            temp_dir: None,
        }
    }
}
