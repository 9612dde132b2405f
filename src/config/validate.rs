use regex::Regex;
use thiserror::Error;

use super::schema::Config;
use crate::deck::TriggerMode;

const MAX_TIMEOUT_SECONDS: u64 = 600;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Validation(String),
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bot_token.trim().is_empty() {
            return Err(ConfigError::Validation(
                "bot_token must not be empty".to_string(),
            ));
        }

        if self.trigger.mode == TriggerMode::StrictPrefix
            && self.trigger.command_prefix.is_empty()
        {
            return Err(ConfigError::Validation(
                "trigger.command_prefix must not be empty when trigger.mode is strict-prefix"
                    .to_string(),
            ));
        }
        if self.trigger.code_pattern.trim().is_empty() {
            return Err(ConfigError::Validation(
                "trigger.code_pattern must not be empty".to_string(),
            ));
        }
        if let Err(error) = Regex::new(&self.trigger.code_pattern) {
            return Err(ConfigError::Validation(format!(
                "trigger.code_pattern is not a valid regular expression: {}",
                error
            )));
        }

        let base_url = self.renderer.base_url.trim();
        if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
            return Err(ConfigError::Validation(
                "renderer.base_url must start with http:// or https://".to_string(),
            ));
        }
        if self.renderer.renderer_path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "renderer.renderer_path must not be empty".to_string(),
            ));
        }
        if !(1..=MAX_TIMEOUT_SECONDS).contains(&self.renderer.timeout_seconds) {
            return Err(ConfigError::Validation(format!(
                "renderer.timeout_seconds must be between 1 and {}",
                MAX_TIMEOUT_SECONDS
            )));
        }
        if self
            .renderer
            .temp_dir
            .as_deref()
            .is_some_and(|dir| dir.trim().is_empty())
        {
            return Err(ConfigError::Validation(
                "renderer.temp_dir must not be empty when set".to_string(),
            ));
        }

        Ok(())
    }
}
