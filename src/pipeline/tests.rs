use std::{
    io::Write,
    path::PathBuf,
    sync::{Arc, Mutex},
};

use crate::config::RendererConfig;
use crate::deck::{BotAccount, DeckCode, InboundMessage, TriggerDetector, TriggerMode};
use crate::delivery::Outcome;
use crate::renderer::{ProcessRenderer, RenderBackend, RenderError, RenderedFile};

use super::ScreenshotPipeline;

const CODE_PATTERN: &str = "%%[A-Za-z0-9|;]+";

#[derive(Clone, Default)]
struct RecordingRenderer {
    output_dir: Option<PathBuf>,
    payload: Vec<u8>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl RecordingRenderer {
    fn failing() -> Self {
        Self::default()
    }

    fn writing(output_dir: PathBuf, payload: &[u8]) -> Self {
        Self {
            output_dir: Some(output_dir),
            payload: payload.to_vec(),
            calls: Arc::default(),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }
}

impl RenderBackend for RecordingRenderer {
    async fn render(&self, code: &DeckCode) -> Result<RenderedFile, RenderError> {
        self.calls
            .lock()
            .expect("calls lock")
            .push(code.as_str().to_string());

        let Some(dir) = &self.output_dir else {
            return Err(RenderError::Process {
                status: Some(1),
                stderr: "stub failure".to_string(),
            });
        };

        let mut file = tempfile::Builder::new()
            .prefix("deck-")
            .suffix(".png")
            .tempfile_in(dir)
            .map_err(RenderError::TempFile)?;
        file.write_all(&self.payload).map_err(RenderError::TempFile)?;
        Ok(RenderedFile::from_temp_path(file.into_temp_path()))
    }
}

fn pipeline(mode: TriggerMode, renderer: RecordingRenderer) -> ScreenshotPipeline<RecordingRenderer> {
    let detector = TriggerDetector::new(
        mode,
        "!",
        CODE_PATTERN,
        BotAccount::new(Some("kards_deck_bot".to_string()), Some(4242)),
    )
    .expect("detector should build");
    ScreenshotPipeline::new(detector, renderer)
}

fn dir_is_empty(dir: &std::path::Path) -> bool {
    std::fs::read_dir(dir).expect("read dir").next().is_none()
}

#[tokio::test]
async fn non_matching_message_never_invokes_renderer() {
    for mode in [
        TriggerMode::StrictPrefix,
        TriggerMode::Anywhere,
        TriggerMode::MentionGated,
    ] {
        let renderer = RecordingRenderer::failing();
        let pipeline = pipeline(mode, renderer.clone());

        let outcome = pipeline.process(&InboundMessage::new("hello world")).await;

        assert!(outcome.is_none(), "mode={}", mode.as_str());
        assert!(renderer.calls().is_empty(), "mode={}", mode.as_str());
    }
}

#[tokio::test]
async fn strict_prefix_scenario_renders_expected_code_and_url() {
    let dir = tempfile::tempdir().expect("temp dir");
    let renderer = RecordingRenderer::writing(dir.path().to_path_buf(), b"\x89PNGdeck");
    let pipeline = pipeline(TriggerMode::StrictPrefix, renderer.clone());

    let outcome = pipeline
        .process(&InboundMessage::new("!%%45|o0o5j4"))
        .await
        .expect("trigger should match");

    assert_eq!(renderer.calls(), vec!["%%45|o0o5j4".to_string()]);
    assert!(matches!(outcome, Outcome::Image { ref bytes, .. } if bytes == b"\x89PNGdeck"));
    assert!(dir_is_empty(dir.path()));

    let url = ProcessRenderer::from_config(&RendererConfig::default())
        .deck_url(&DeckCode::new("%%45|o0o5j4"));
    assert_eq!(
        url,
        "https://www.kards.com/decks/deck-builder?hash=%%45|o0o5j4"
    );
}

#[tokio::test]
async fn mention_gated_pipeline_skips_unaddressed_messages() {
    let dir = tempfile::tempdir().expect("temp dir");
    let renderer = RecordingRenderer::writing(dir.path().to_path_buf(), b"png");
    let pipeline = pipeline(TriggerMode::MentionGated, renderer.clone());

    assert!(
        pipeline
            .process(&InboundMessage::new("%%45|o0o5j4"))
            .await
            .is_none()
    );
    assert!(renderer.calls().is_empty());

    let addressed =
        InboundMessage::new("look %%45|o0o5j4").with_mentions(vec!["kards_deck_bot".into()]);
    assert!(pipeline.process(&addressed).await.is_some());
    assert_eq!(renderer.calls(), vec!["%%45|o0o5j4".to_string()]);
}

#[tokio::test]
async fn renderer_failure_becomes_generic_negative_acknowledgement() {
    let renderer = RecordingRenderer::failing();
    let pipeline = pipeline(TriggerMode::Anywhere, renderer.clone());

    let outcome = pipeline
        .process(&InboundMessage::new("deck %%45|o0o5j4"))
        .await
        .expect("trigger should match");

    assert_eq!(
        outcome,
        Outcome::Failure {
            code: "RENDER_PROCESS_ERROR"
        }
    );
    assert_eq!(renderer.calls().len(), 1);
}

#[tokio::test]
async fn repeated_requests_are_independent() {
    let dir = tempfile::tempdir().expect("temp dir");
    let renderer = RecordingRenderer::writing(dir.path().to_path_buf(), b"png");
    let pipeline = pipeline(TriggerMode::StrictPrefix, renderer.clone());
    let code = DeckCode::new("%%45|o0o5j4");

    let first = pipeline.render_and_deliver(&code).await;
    let second = pipeline.render_and_deliver(&code).await;

    assert!(matches!(first, Outcome::Image { .. }));
    assert!(matches!(second, Outcome::Image { .. }));
    assert_eq!(renderer.calls().len(), 2);
    assert!(dir_is_empty(dir.path()));
}
