use std::io;
use std::path::{Path, PathBuf};

/// A temporary file path owned by one conversion. Deleted by `release`, or
/// on drop if the owning future was cancelled before it got there.
#[derive(Debug)]
pub struct TempArtifact {
    path: PathBuf,
    released: bool,
}

impl TempArtifact {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            released: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Deletes the file. Failures are logged and never returned.
    pub async fn release(mut self) {
        self.released = true;
        log_removal(&self.path, tokio::fs::remove_file(&self.path).await);
    }
}

impl Drop for TempArtifact {
    fn drop(&mut self) {
        if !self.released {
            log_removal(&self.path, std::fs::remove_file(&self.path));
        }
    }
}

fn log_removal(path: &Path, result: io::Result<()>) {
    match result {
        Ok(()) => tracing::debug!(path = %path.display(), "Removed staging file"),
        // Never created, e.g. the converter failed before writing output.
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(
            error = %e,
            path = %path.display(),
            "Failed to remove staging file"
        ),
    }
}
