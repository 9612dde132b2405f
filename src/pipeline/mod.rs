use std::time::Instant;

use crate::deck::{DeckCode, InboundMessage, TriggerDetector};
use crate::delivery::{Outcome, deliver};
use crate::renderer::RenderBackend;

pub struct ScreenshotPipeline<R> {
    detector: TriggerDetector,
    renderer: R,
}

impl<R: RenderBackend> ScreenshotPipeline<R> {
    pub fn new(detector: TriggerDetector, renderer: R) -> Self {
        Self { detector, renderer }
    }

    pub fn detector(&self) -> &TriggerDetector {
        &self.detector
    }

    pub fn detect(&self, inbound: &InboundMessage) -> Option<DeckCode> {
        self.detector.detect_inbound(inbound)
    }

    pub async fn process(&self, inbound: &InboundMessage) -> Option<Outcome> {
        let code = self.detect(inbound)?;
        Some(self.render_and_deliver(&code).await)
    }

    pub async fn render_and_deliver(&self, code: &DeckCode) -> Outcome {
        let started_at = Instant::now();
        log::info!("deck_request_started deck_code={}", code);

        let outcome = deliver(self.renderer.render(code).await).await;

        match &outcome {
            Outcome::Image { bytes, .. } => log::info!(
                "deck_request_completed deck_code={} bytes={} elapsed_ms={}",
                code,
                bytes.len(),
                started_at.elapsed().as_millis()
            ),
            Outcome::Failure { code: reason } => log::warn!(
                "deck_request_failed deck_code={} reason={} elapsed_ms={}",
                code,
                reason,
                started_at.elapsed().as_millis()
            ),
        }

        outcome
    }
}

#[cfg(test)]
mod tests;
