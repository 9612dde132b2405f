use std::sync::Arc;

use crate::config::{Config, ConfigError};
use crate::deck::{BotAccount, TriggerDetector};
use crate::pipeline::ScreenshotPipeline;
use crate::renderer::ProcessRenderer;

#[derive(Clone)]
pub struct AppContext {
    pub pipeline: Arc<ScreenshotPipeline<ProcessRenderer>>,
}

impl AppContext {
    pub fn new(config: &Config, account: BotAccount) -> Result<Self, ConfigError> {
        let detector = TriggerDetector::new(
            config.trigger.mode,
            &config.trigger.command_prefix,
            &config.trigger.code_pattern,
            account,
        )
        .map_err(|error| {
            ConfigError::Validation(format!(
                "trigger.code_pattern is not a valid regular expression: {}",
                error
            ))
        })?;
        let renderer = ProcessRenderer::from_config(&config.renderer);

        Ok(Self {
            pipeline: Arc::new(ScreenshotPipeline::new(detector, renderer)),
        })
    }
}
