use super::assembler::Assembler;
use super::language::LanguageCode;
use super::model::{AudioTrack, LanguageOutcome, LanguageStage, RunReport};
use super::sectioner::section;
use super::synthesizer::Synthesizer;
use crate::error::{NarrationError, NarrationResult};
use crate::infrastructure::audio::{Concatenator, ScratchSpace};
use crate::infrastructure::config::Config;
use crate::infrastructure::repositories::TtsRepository;
use std::io::ErrorKind;
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

/// Drives sectioning, synthesis and assembly for each configured language.
pub struct NarrationService {
    config: Arc<Config>,
    synthesizer: Synthesizer,
    assembler: Assembler,
}

impl NarrationService {
    pub fn new(
        config: Arc<Config>,
        tts_repo: Arc<dyn TtsRepository>,
        concatenator: Arc<dyn Concatenator>,
    ) -> Self {
        let synthesizer =
            Synthesizer::new(tts_repo, config.voice(), config.synthesis_concurrency);
        let assembler = Assembler::new(concatenator);

        Self {
            config,
            synthesizer,
            assembler,
        }
    }

    /// Narrate every language in order.
    ///
    /// Languages are isolated from each other: a missing translation is
    /// skipped, and a synthesis or concatenation failure only fails its own
    /// language before the run moves on.
    pub async fn run(&self, languages: &[LanguageCode]) -> RunReport {
        let mut report = RunReport::new(Uuid::new_v4());

        tracing::info!(
            run_id = %report.run_id,
            language_count = languages.len(),
            "Starting narration run"
        );

        for language in languages {
            let span = tracing::info_span!("narrate", run_id = %report.run_id, language = %language);
            let outcome = self.narrate_language(language).instrument(span).await;
            report.record(language.clone(), outcome);
        }

        report
    }

    /// Narrate one language, returning its terminal state instead of raising
    pub async fn narrate_language(&self, language: &LanguageCode) -> LanguageOutcome {
        let mut stage = LanguageStage::Pending;

        let result = self.process(language, &mut stage).await;
        match result {
            Ok(track) => {
                tracing::info!(
                    language = %language,
                    output = %track.path.display(),
                    segment_count = track.segment_count,
                    size_bytes = track.size_bytes,
                    "Saved: {}",
                    track.path.display()
                );
                LanguageOutcome::Done(track)
            }
            Err(error) if error.is_skip() => {
                tracing::warn!(language = %language, reason = %error, "Skipping {}", language);
                LanguageOutcome::Skipped(error)
            }
            Err(error) => {
                tracing::error!(
                    language = %language,
                    stage = %stage,
                    kind = error.kind(),
                    error = %error,
                    "Narration failed"
                );
                LanguageOutcome::Failed { stage, error }
            }
        }
    }

    async fn process(
        &self,
        language: &LanguageCode,
        stage: &mut LanguageStage,
    ) -> NarrationResult<AudioTrack> {
        let input_path = self.config.input_path(language);

        let text = match tokio::fs::read_to_string(&input_path).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(NarrationError::MissingInput {
                    language: language.to_string(),
                    path: input_path,
                });
            }
            Err(e) => return Err(e.into()),
        };

        let text = text.trim();
        if text.is_empty() {
            return Err(NarrationError::EmptyInput {
                language: language.to_string(),
                path: input_path,
            });
        }

        tracing::info!(language = %language, text_length = text.len(), "Generating audio for {}", language);

        let sections = section(text, self.config.max_chunk_size);
        *stage = LanguageStage::Sectioned;

        tracing::info!(
            language = %language,
            section_count = sections.len(),
            max_chunk_size = self.config.max_chunk_size,
            "Text split into sections"
        );

        // Dropped on every path out of this function, taking segments with it
        let scratch = ScratchSpace::create(&self.config.scratch_root(), language)?;

        *stage = LanguageStage::Synthesizing;
        let segments = self
            .synthesizer
            .synthesize_sections(language, &sections, &scratch)
            .await?;

        *stage = LanguageStage::Assembling;
        let output_path = self.config.output_path(language);
        let track = self
            .assembler
            .assemble(language, segments, &scratch, &output_path)
            .await?;

        Ok(track)
    }
}
