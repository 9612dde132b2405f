use thiserror::Error;

use crate::renderer::{RenderError, RenderedFile, release_temp_path};

pub const DECK_SCREENSHOT_FAILED_TEXT: &str =
    "Could not generate the deck screenshot. Please check the deck code and try again.";

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("failed to read rendered file: {0}")]
    Read(std::io::Error),
    #[error("rendered file was empty when read")]
    Empty,
}

impl DeliveryError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Read(_) => "DELIVERY_READ_ERROR",
            Self::Empty => "DELIVERY_EMPTY_PAYLOAD",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Image { bytes: Vec<u8>, file_name: String },
    Failure { code: &'static str },
}

pub async fn deliver(result: Result<RenderedFile, RenderError>) -> Outcome {
    let rendered = match result {
        Ok(rendered) => rendered,
        Err(error) => {
            log::error!(
                "deck_render_failed code={} error={}",
                error.code(),
                error
            );
            return Outcome::Failure { code: error.code() };
        }
    };

    let file_name = rendered.file_name();
    let payload = read_payload(&rendered).await;
    release_temp_path(rendered.into_temp_path());

    match payload {
        Ok(bytes) => Outcome::Image { bytes, file_name },
        Err(error) => {
            log::error!(
                "deck_delivery_failed code={} error={}",
                error.code(),
                error
            );
            Outcome::Failure { code: error.code() }
        }
    }
}

async fn read_payload(rendered: &RenderedFile) -> Result<Vec<u8>, DeliveryError> {
    let bytes = tokio::fs::read(rendered.path())
        .await
        .map_err(DeliveryError::Read)?;
    if bytes.is_empty() {
        return Err(DeliveryError::Empty);
    }
    Ok(bytes)
}
