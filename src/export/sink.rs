use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::error::CardResult;

/// A finished export: file name, MIME type and contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    /// Suggested download file name.
    pub file_name: String,
    /// MIME type of `bytes`.
    pub mime: &'static str,
    /// File contents.
    pub bytes: Vec<u8>,
}

/// Destination for finished artifacts (the "download" step).
///
/// Only complete artifacts are ever delivered; a failed export never reaches the sink.
pub trait ArtifactSink {
    /// Deliver one artifact. Returns where it ended up, if the sink has a notion of location.
    fn deliver(&mut self, artifact: &Artifact) -> CardResult<Option<PathBuf>>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    pub(crate) artifacts: Vec<Artifact>,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the delivered artifacts in delivery order.
    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }
}

impl ArtifactSink for InMemorySink {
    fn deliver(&mut self, artifact: &Artifact) -> CardResult<Option<PathBuf>> {
        self.artifacts.push(artifact.clone());
        Ok(None)
    }
}

/// Writes artifacts into a directory, overwriting files with the same name.
#[derive(Clone, Debug)]
pub struct DirSink {
    dir: PathBuf,
}

impl DirSink {
    /// Sink writing into `dir` (created on first delivery).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ArtifactSink for DirSink {
    fn deliver(&mut self, artifact: &Artifact) -> CardResult<Option<PathBuf>> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create output dir '{}'", self.dir.display()))?;
        let path = self.dir.join(&artifact.file_name);
        // Only complete files appear under the final name.
        let part = self.dir.join(format!(".{}.part", artifact.file_name));
        let written = std::fs::write(&part, &artifact.bytes)
            .with_context(|| format!("write '{}'", part.display()))
            .and_then(|()| {
                std::fs::rename(&part, &path).with_context(|| {
                    format!("rename '{}' -> '{}'", part.display(), path.display())
                })
            });
        if let Err(err) = written {
            let _ = std::fs::remove_file(&part);
            return Err(err.into());
        }
        tracing::info!(path = %path.display(), bytes = artifact.bytes.len(), "wrote artifact");
        Ok(Some(path))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/sink.rs"]
mod tests;
