use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to allocate temporary output file: {0}")]
    TempFile(std::io::Error),
    #[error("failed to launch renderer {program}: {source}")]
    Launch {
        program: String,
        source: std::io::Error,
    },
    #[error("renderer timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },
    #[error("renderer exited with status {}: {stderr}", describe_status(.status))]
    Process { status: Option<i32>, stderr: String },
    #[error("renderer produced no usable output: {0}")]
    OutputInvalid(String),
}

impl RenderError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::TempFile(_) => "RENDER_TEMP_FILE_ERROR",
            Self::Launch { .. } => "RENDER_LAUNCH_FAILURE",
            Self::Timeout { .. } => "RENDER_TIMEOUT",
            Self::Process { .. } => "RENDER_PROCESS_ERROR",
            Self::OutputInvalid(_) => "RENDER_OUTPUT_INVALID",
        }
    }
}

fn describe_status(status: &Option<i32>) -> String {
    status
        .map(|code| code.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
