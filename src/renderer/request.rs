use std::{
    io,
    path::{Path, PathBuf},
    time::Duration,
};

use tempfile::TempPath;

const OUTPUT_FILE_PREFIX: &str = "deck-";
const OUTPUT_FILE_SUFFIX: &str = ".png";

#[derive(Debug)]
pub struct RenderRequest {
    pub url: String,
    pub timeout: Duration,
    output: TempPath,
}

impl RenderRequest {
    pub fn allocate(url: String, temp_dir: Option<&Path>, timeout: Duration) -> io::Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(OUTPUT_FILE_PREFIX).suffix(OUTPUT_FILE_SUFFIX);
        let file = match temp_dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };

        Ok(Self {
            url,
            timeout,
            output: file.into_temp_path(),
        })
    }

    pub fn output_path(&self) -> &Path {
        &self.output
    }

    pub(super) fn into_rendered(self) -> RenderedFile {
        RenderedFile { path: self.output }
    }

    pub(super) fn discard(self) {
        release_temp_path(self.output);
    }
}

#[derive(Debug)]
pub struct RenderedFile {
    path: TempPath,
}

impl RenderedFile {
    #[cfg(test)]
    pub(crate) fn from_temp_path(path: TempPath) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("deck{}", OUTPUT_FILE_SUFFIX))
    }

    pub fn into_temp_path(self) -> TempPath {
        self.path
    }
}

pub fn release_temp_path(path: TempPath) {
    let display: PathBuf = path.to_path_buf();
    match path.close() {
        Ok(()) => log::debug!("deck_temp_file_removed path={}", display.display()),
        Err(error) if error.kind() == io::ErrorKind::NotFound => {}
        Err(error) => log::warn!(
            "deck_temp_file_cleanup_failed path={} error={}",
            display.display(),
            error
        ),
    }
}
