use std::path::{Path, PathBuf};

use tempfile::TempDir;

const UPLOAD_FILE_NAME: &str = "resume.pdf";

/// An uploaded file held in its own temporary directory.
///
/// The directory and file are removed when this value is dropped, whichever
/// way the request ends.
#[derive(Debug)]
pub struct ScopedUpload {
    _dir: TempDir,
    path: PathBuf,
}

impl ScopedUpload {
    pub async fn write(bytes: &[u8]) -> std::io::Result<Self> {
        let dir = tempfile::Builder::new().prefix("evaluator-").tempdir()?;
        let path = dir.path().join(UPLOAD_FILE_NAME);
        tokio::fs::write(&path, bytes).await?;
        Ok(Self { _dir: dir, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    #[cfg(test)]
    pub fn dir(&self) -> &Path {
        self._dir.path()
    }
}
