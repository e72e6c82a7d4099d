use super::language::LanguageCode;
use super::model::AudioSegment;
use crate::error::{NarrationError, NarrationResult};
use crate::infrastructure::audio::ScratchSpace;
use crate::infrastructure::config::VoiceConfig;
use crate::infrastructure::repositories::TtsRepository;
use futures::stream::{self, StreamExt, TryStreamExt};
use std::path::PathBuf;
use std::sync::Arc;

/// Turns sections into audio segments, one synthesis call per section.
pub struct Synthesizer {
    tts_repo: Arc<dyn TtsRepository>,
    voice: VoiceConfig,
    max_concurrent_requests: usize,
}

impl Synthesizer {
    pub fn new(
        tts_repo: Arc<dyn TtsRepository>,
        voice: VoiceConfig,
        max_concurrent_requests: usize,
    ) -> Self {
        Self {
            tts_repo,
            voice,
            max_concurrent_requests: max_concurrent_requests.max(1),
        }
    }

    /// Synthesize every section of one language.
    ///
    /// Up to `max_concurrent_requests` calls are in flight at once, but the
    /// returned segments are always in section-index order. The first
    /// failure stops the language; calls still in flight are dropped.
    /// Whitespace-only sections produce no segment.
    pub async fn synthesize_sections(
        &self,
        language: &LanguageCode,
        sections: &[&str],
        scratch: &ScratchSpace,
    ) -> NarrationResult<Vec<AudioSegment>> {
        let total = sections.len();

        let pending: Vec<(usize, &str)> = sections
            .iter()
            .copied()
            .enumerate()
            .filter(|(index, text)| {
                let blank = text.trim().is_empty();
                if blank {
                    tracing::debug!(section_index = index, "Skipping blank section");
                }
                !blank
            })
            .collect();

        stream::iter(pending)
            .map(|(index, text)| {
                let destination = scratch.segment_path(language, index);
                self.synthesize(language, index, total, text, destination)
            })
            .buffered(self.max_concurrent_requests)
            .try_collect()
            .await
    }

    /// One synthesis request for one section, streamed into `destination`
    pub async fn synthesize(
        &self,
        language: &LanguageCode,
        section_index: usize,
        section_count: usize,
        text: &str,
        destination: PathBuf,
    ) -> NarrationResult<AudioSegment> {
        tracing::info!(
            language = %language,
            section_index = section_index,
            section_size = text.len(),
            "Converting section {}/{}",
            section_index + 1,
            section_count
        );

        let size_bytes = self
            .tts_repo
            .synthesize_to_file(text, &self.voice, &destination)
            .await
            .map_err(|message| NarrationError::Synthesis {
                language: language.to_string(),
                section_index,
                message,
            })?;

        Ok(AudioSegment {
            section_index,
            path: destination,
            size_bytes,
        })
    }
}
