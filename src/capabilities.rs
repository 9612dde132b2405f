use std::path::Path;
use std::process::Command;

use crate::config::RendererConfig;

#[derive(Debug, Clone)]
pub struct Capabilities {
    pub interpreter: Option<String>,
    pub has_interpreter: bool,
    pub has_renderer: bool,
    pub has_temp_dir: bool,
}

impl Capabilities {
    pub fn detect(config: &RendererConfig) -> Self {
        let interpreter = config
            .interpreter
            .as_deref()
            .map(str::trim)
            .filter(|interpreter| !interpreter.is_empty())
            .map(str::to_string);

        Self {
            has_interpreter: interpreter.as_deref().is_none_or(command_exists),
            interpreter,
            has_renderer: Path::new(&config.renderer_path).is_file(),
            has_temp_dir: config
                .temp_dir
                .as_deref()
                .is_none_or(|dir| Path::new(dir).is_dir()),
        }
    }
}

fn command_exists(command: &str) -> bool {
    Command::new("sh")
        .arg("-c")
        .arg(format!("command -v '{}' >/dev/null 2>&1", command))
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}
