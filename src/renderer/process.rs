use std::{
    path::{Path, PathBuf},
    process::Stdio,
    time::Duration,
};

use tokio::{
    io::{AsyncRead, AsyncReadExt},
    process::{Child, Command},
    task::JoinHandle,
    time::timeout,
};

use crate::config::RendererConfig;
use crate::deck::{DeckCode, build_deck_url};

use super::{RenderBackend, RenderError, RenderRequest, RenderedFile};

const STREAM_CAPTURE_LIMIT_BYTES: u64 = 16 * 1024;
const STREAM_DRAIN_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Clone)]
pub struct ProcessRenderer {
    base_url: String,
    interpreter: Option<String>,
    renderer_path: PathBuf,
    timeout: Duration,
    percent_encode_code: bool,
    temp_dir: Option<PathBuf>,
}

impl ProcessRenderer {
    pub fn from_config(config: &RendererConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            interpreter: config
                .interpreter
                .as_deref()
                .map(str::trim)
                .filter(|interpreter| !interpreter.is_empty())
                .map(str::to_string),
            renderer_path: PathBuf::from(&config.renderer_path),
            timeout: Duration::from_secs(config.timeout_seconds),
            percent_encode_code: config.percent_encode_code,
            temp_dir: config.temp_dir.as_ref().map(PathBuf::from),
        }
    }

    pub fn deck_url(&self, code: &DeckCode) -> String {
        build_deck_url(&self.base_url, code, self.percent_encode_code)
    }

    pub async fn run(&self, request: RenderRequest) -> Result<RenderedFile, RenderError> {
        match self.execute(&request).await {
            Ok(()) => Ok(request.into_rendered()),
            Err(error) => {
                request.discard();
                Err(error)
            }
        }
    }

    async fn execute(&self, request: &RenderRequest) -> Result<(), RenderError> {
        let mut child = self
            .command(request)
            .spawn()
            .map_err(|source| RenderError::Launch {
                program: self.program_label(),
                source,
            })?;
        // tokio forgets the pid once the child is reaped.
        let pid = child.id();

        let stdout = child.stdout.take().map(spawn_capture);
        let stderr = child.stderr.take().map(spawn_capture);

        let status = match timeout(request.timeout, child.wait()).await {
            Ok(Ok(status)) => status,
            Ok(Err(error)) => {
                terminate_process_group(&mut child, pid).await;
                abort_capture(stdout);
                abort_capture(stderr);
                return Err(RenderError::Process {
                    status: None,
                    stderr: format!("wait failed: {}", error),
                });
            }
            Err(_) => {
                log::warn!(
                    "deck_renderer_timeout program={} timeout_secs={} url={}",
                    self.program_label(),
                    request.timeout.as_secs(),
                    request.url
                );
                terminate_process_group(&mut child, pid).await;
                abort_capture(stdout);
                abort_capture(stderr);
                return Err(RenderError::Timeout {
                    timeout_secs: request.timeout.as_secs(),
                });
            }
        };

        // Descendants left behind by the renderer would hold the pipes open.
        #[cfg(unix)]
        kill_process_group(pid);

        let (stdout, stderr) = tokio::join!(finish_capture(stdout), finish_capture(stderr));
        if !stdout.trim().is_empty() {
            log::debug!("deck_renderer_stdout output={:?}", stdout.trim());
        }

        if !status.success() {
            return Err(RenderError::Process {
                status: status.code(),
                stderr: stderr.trim().to_string(),
            });
        }

        verify_output(request.output_path()).await
    }

    fn command(&self, request: &RenderRequest) -> Command {
        let mut command = match &self.interpreter {
            Some(interpreter) => {
                let mut command = Command::new(interpreter);
                command.arg(&self.renderer_path);
                command
            }
            None => Command::new(&self.renderer_path),
        };

        command
            .arg(&request.url)
            .arg(request.output_path())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        // Own process group, so a timeout also takes down browser children.
        #[cfg(unix)]
        command.process_group(0);

        command
    }

    fn program_label(&self) -> String {
        match &self.interpreter {
            Some(interpreter) => format!("{} {}", interpreter, self.renderer_path.display()),
            None => self.renderer_path.display().to_string(),
        }
    }
}

impl RenderBackend for ProcessRenderer {
    async fn render(&self, code: &DeckCode) -> Result<RenderedFile, RenderError> {
        let request = RenderRequest::allocate(
            self.deck_url(code),
            self.temp_dir.as_deref(),
            self.timeout,
        )
        .map_err(RenderError::TempFile)?;

        log::info!(
            "deck_render_started deck_code={} url={} output={} timeout_secs={}",
            code,
            request.url,
            request.output_path().display(),
            request.timeout.as_secs()
        );

        self.run(request).await
    }
}

async fn verify_output(path: &Path) -> Result<(), RenderError> {
    match tokio::fs::metadata(path).await {
        Ok(metadata) if metadata.len() > 0 => Ok(()),
        Ok(_) => Err(RenderError::OutputInvalid(
            "output file is empty".to_string(),
        )),
        Err(error) => Err(RenderError::OutputInvalid(format!(
            "output file is missing: {}",
            error
        ))),
    }
}

fn spawn_capture<R>(reader: R) -> JoinHandle<String>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut reader = reader;
        let mut captured = Vec::new();
        if let Err(error) = (&mut reader)
            .take(STREAM_CAPTURE_LIMIT_BYTES)
            .read_to_end(&mut captured)
            .await
        {
            log::debug!("deck_renderer_stream_read_failed error={}", error);
        }

        // Keep draining past the limit so the renderer never blocks on a full pipe.
        let _ = tokio::io::copy(&mut reader, &mut tokio::io::sink()).await;
        String::from_utf8_lossy(&captured).into_owned()
    })
}

async fn finish_capture(handle: Option<JoinHandle<String>>) -> String {
    let Some(mut handle) = handle else {
        return String::new();
    };

    match timeout(STREAM_DRAIN_TIMEOUT, &mut handle).await {
        Ok(Ok(output)) => output,
        Ok(Err(join_error)) => {
            log::warn!("deck_renderer_stream_task_failed error={}", join_error);
            String::new()
        }
        Err(_) => {
            handle.abort();
            String::new()
        }
    }
}

fn abort_capture(handle: Option<JoinHandle<String>>) {
    if let Some(handle) = handle {
        handle.abort();
    }
}

async fn terminate_process_group(child: &mut Child, pid: Option<u32>) {
    #[cfg(unix)]
    kill_process_group(pid);
    #[cfg(not(unix))]
    let _ = pid;

    if let Err(error) = child.start_kill() {
        log::debug!("deck_renderer_kill_skipped error={}", error);
    }
    if let Err(error) = child.wait().await {
        log::warn!("deck_renderer_reap_failed error={}", error);
    }
}

#[cfg(unix)]
fn kill_process_group(pid: Option<u32>) {
    use nix::{
        errno::Errno,
        sys::signal::{Signal, killpg},
        unistd::Pid,
    };

    let Some(raw_pid) = pid.and_then(|pid| i32::try_from(pid).ok()) else {
        return;
    };

    match killpg(Pid::from_raw(raw_pid), Signal::SIGKILL) {
        Ok(()) | Err(Errno::ESRCH) => {}
        Err(error) => log::warn!(
            "deck_renderer_group_kill_failed pgid={} error={}",
            raw_pid,
            error
        ),
    }
}
