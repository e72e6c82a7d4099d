use crate::domain::narration::LanguageCode;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Per-language scratch directory holding segments and the manifest.
///
/// The directory name is unique per invocation, so concurrent runs never
/// share segment paths. It is removed when the value is dropped, whatever
/// the outcome of the language; removal failures are only logged.
pub struct ScratchSpace {
    dir: Option<TempDir>,
    root: PathBuf,
}

impl ScratchSpace {
    pub fn create(parent: &Path, language: &LanguageCode) -> io::Result<Self> {
        std::fs::create_dir_all(parent)?;
        // Manifest entries must be absolute for the concat demuxer
        let parent = std::fs::canonicalize(parent)?;

        let dir = tempfile::Builder::new()
            .prefix(&format!("narrate-{}-", language))
            .tempdir_in(&parent)?;
        let root = dir.path().to_path_buf();

        tracing::debug!(scratch = %root.display(), "Scratch space created");

        Ok(Self {
            dir: Some(dir),
            root,
        })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Segment file for one section, e.g. `es_0003.mp3`
    pub fn segment_path(&self, language: &LanguageCode, section_index: usize) -> PathBuf {
        self.root
            .join(format!("{}_{:04}.mp3", language, section_index))
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join("manifest.txt")
    }
}

impl Drop for ScratchSpace {
    fn drop(&mut self) {
        if let Some(dir) = self.dir.take() {
            if let Err(e) = dir.close() {
                tracing::warn!(
                    error = %e,
                    scratch = %self.root.display(),
                    "Failed to remove scratch space"
                );
            }
        }
    }
}

/// Best-effort removal of a temporary file; a failure is logged, never raised.
pub fn remove_quietly(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => {
            tracing::warn!(error = %e, path = %path.display(), "Failed to remove temporary file");
        }
    }
}
