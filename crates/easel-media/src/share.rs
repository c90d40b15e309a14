use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{MediaError, Result};

/// Hands an image file to another application
pub trait ShareTarget: Send + Sync {
    /// Whether sharing can currently be offered
    fn is_available(&self) -> bool;

    /// Share `file`, whose content has the given MIME type
    fn share(&self, file: &Path, mime_type: &str) -> Result<()>;
}

/// Share target that drops files into an outbox directory
#[derive(Debug, Clone)]
pub struct OutboxShareTarget {
    dir: PathBuf,
}

impl OutboxShareTarget {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ShareTarget for OutboxShareTarget {
    fn is_available(&self) -> bool {
        fs::create_dir_all(&self.dir).is_ok()
    }

    fn share(&self, file: &Path, mime_type: &str) -> Result<()> {
        let name = file
            .file_name()
            .ok_or_else(|| MediaError::InvalidImageData("shared file has no name".to_string()))?;
        let destination = self.dir.join(name);

        fs::copy(file, &destination).map_err(|e| MediaError::from_io("sharing image", e))?;

        tracing::info!(mime_type, path = %destination.display(), "image shared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copies_into_outbox() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("fox.png");
        fs::write(&source, b"png").unwrap();

        let target = OutboxShareTarget::new(dir.path().join("outbox"));
        assert!(target.is_available());
        target.share(&source, "image/png").unwrap();

        assert_eq!(fs::read(dir.path().join("outbox/fox.png")).unwrap(), b"png");
    }

    #[test]
    fn unavailable_when_outbox_cannot_exist() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, b"").unwrap();

        let target = OutboxShareTarget::new(blocker.join("outbox"));
        assert!(!target.is_available());
    }
}
