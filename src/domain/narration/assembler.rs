use super::language::LanguageCode;
use super::model::{AudioSegment, AudioTrack};
use crate::error::{NarrationError, NarrationResult};
use crate::infrastructure::audio::scratch::remove_quietly;
use crate::infrastructure::audio::{Concatenator, Manifest, ScratchSpace};
use std::path::Path;
use std::sync::Arc;

/// Joins ordered segments into the final track without re-encoding.
pub struct Assembler {
    concatenator: Arc<dyn Concatenator>,
}

impl Assembler {
    pub fn new(concatenator: Arc<dyn Concatenator>) -> Self {
        Self { concatenator }
    }

    /// Concatenate `segments` in the given order into `output_path`.
    ///
    /// The track is written to a staging file next to `output_path` and only
    /// renamed into place on success, so a failed assembly never leaves an
    /// output behind. Segments and the manifest are deleted after a
    /// successful assembly; on failure the scratch space owner removes them.
    pub async fn assemble(
        &self,
        language: &LanguageCode,
        segments: Vec<AudioSegment>,
        scratch: &ScratchSpace,
        output_path: &Path,
    ) -> NarrationResult<AudioTrack> {
        if segments.is_empty() {
            return Err(NarrationError::Concatenation {
                language: language.to_string(),
                message: "no segments to concatenate".to_string(),
            });
        }

        let manifest = Manifest::new(segments.iter().map(|s| s.path.clone()).collect());
        let manifest_path = scratch.manifest_path();
        manifest.write_to(&manifest_path)?;

        let output_dir = match output_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(output_dir)?;

        let staging = tempfile::Builder::new()
            .prefix(&format!(".{}-", language))
            .suffix(".mp3")
            .tempfile_in(output_dir)?
            .into_temp_path();

        tracing::info!(
            language = %language,
            segment_count = segments.len(),
            "Merging {} sections",
            segments.len()
        );

        self.concatenator
            .concat(&manifest_path, &staging)
            .await
            .map_err(|message| NarrationError::Concatenation {
                language: language.to_string(),
                message,
            })?;

        staging
            .persist(output_path)
            .map_err(|e| NarrationError::Io(e.error))?;

        let size_bytes = std::fs::metadata(output_path)?.len();

        remove_quietly(&manifest_path);
        for segment in &segments {
            remove_quietly(&segment.path);
        }

        Ok(AudioTrack {
            language: language.clone(),
            path: output_path.to_path_buf(),
            segment_count: segments.len(),
            size_bytes,
        })
    }
}
