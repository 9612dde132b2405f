mod error;
mod process;
mod request;

pub use error::RenderError;
pub use process::ProcessRenderer;
pub use request::{RenderRequest, RenderedFile, release_temp_path};

use crate::deck::DeckCode;

pub trait RenderBackend {
    async fn render(&self, code: &DeckCode) -> Result<RenderedFile, RenderError>;
}
