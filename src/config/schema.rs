use serde::Deserialize;

use super::defaults::*;
use crate::deck::TriggerMode;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub bot_token: String,
    #[serde(default)]
    pub trigger: TriggerConfig,
    #[serde(default)]
    pub renderer: RendererConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TriggerConfig {
    #[serde(default = "default_trigger_mode", alias = "trigger_mode")]
    pub mode: TriggerMode,
    #[serde(default = "default_command_prefix")]
    pub command_prefix: String,
    #[serde(default = "default_code_pattern")]
    pub code_pattern: String,
    #[serde(default)]
    pub bot_username: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RendererConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_interpreter")]
    pub interpreter: Option<String>,
    #[serde(default = "default_renderer_path")]
    pub renderer_path: String,
    #[serde(default = "default_timeout_seconds", alias = "timeout_secs")]
    pub timeout_seconds: u64,
    #[serde(default)]
    pub percent_encode_code: bool,
    #[serde(default)]
    pub temp_dir: Option<String>,
}
