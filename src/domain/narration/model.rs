use super::language::LanguageCode;
use crate::error::NarrationError;
use std::path::PathBuf;
use uuid::Uuid;

/// Audio produced by one synthesis call for one section.
/// Lives in the language's scratch space until the assembler consumes it.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioSegment {
    pub section_index: usize,
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// Final narrated audio for one language
#[derive(Debug, Clone, PartialEq)]
pub struct AudioTrack {
    pub language: LanguageCode,
    pub path: PathBuf,
    pub segment_count: usize,
    pub size_bytes: u64,
}

/// Where a language was in the pipeline when it stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageStage {
    Pending,
    Sectioned,
    Synthesizing,
    Assembling,
}

impl std::fmt::Display for LanguageStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LanguageStage::Pending => "pending",
            LanguageStage::Sectioned => "sectioned",
            LanguageStage::Synthesizing => "synthesizing",
            LanguageStage::Assembling => "assembling",
        };
        write!(f, "{}", name)
    }
}

/// Terminal state of one language
#[derive(Debug)]
pub enum LanguageOutcome {
    Done(AudioTrack),
    Skipped(NarrationError),
    Failed {
        stage: LanguageStage,
        error: NarrationError,
    },
}

impl LanguageOutcome {
    pub fn is_done(&self) -> bool {
        matches!(self, LanguageOutcome::Done(_))
    }
}

/// Per-language outcomes of one run, in configuration order
#[derive(Debug)]
pub struct RunReport {
    pub run_id: Uuid,
    pub outcomes: Vec<(LanguageCode, LanguageOutcome)>,
}

impl RunReport {
    pub fn new(run_id: Uuid) -> Self {
        Self {
            run_id,
            outcomes: Vec::new(),
        }
    }

    pub fn record(&mut self, language: LanguageCode, outcome: LanguageOutcome) {
        self.outcomes.push((language, outcome));
    }

    pub fn completed(&self) -> Vec<&AudioTrack> {
        self.outcomes
            .iter()
            .filter_map(|(_, outcome)| match outcome {
                LanguageOutcome::Done(track) => Some(track),
                _ => None,
            })
            .collect()
    }

    pub fn skipped(&self) -> Vec<&LanguageCode> {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| matches!(outcome, LanguageOutcome::Skipped(_)))
            .map(|(language, _)| language)
            .collect()
    }

    pub fn failed(&self) -> Vec<(&LanguageCode, LanguageStage, &NarrationError)> {
        self.outcomes
            .iter()
            .filter_map(|(language, outcome)| match outcome {
                LanguageOutcome::Failed { stage, error } => Some((language, *stage, error)),
                _ => None,
            })
            .collect()
    }

    pub fn has_failures(&self) -> bool {
        !self.failed().is_empty()
    }

    pub fn outcome(&self, language: &LanguageCode) -> Option<&LanguageOutcome> {
        self.outcomes
            .iter()
            .find(|(code, _)| code == language)
            .map(|(_, outcome)| outcome)
    }

    pub fn log_summary(&self) {
        let completed = self
            .completed()
            .iter()
            .map(|track| track.language.as_str())
            .collect::<Vec<_>>()
            .join(",");
        let skipped = self
            .skipped()
            .iter()
            .map(|language| language.as_str())
            .collect::<Vec<_>>()
            .join(",");
        let failed = self
            .failed()
            .iter()
            .map(|(language, _, _)| language.as_str())
            .collect::<Vec<_>>()
            .join(",");

        tracing::info!(
            run_id = %self.run_id,
            completed = %completed,
            skipped = %skipped,
            failed = %failed,
            "Narration run finished"
        );

        for (language, stage, error) in self.failed() {
            tracing::error!(
                language = %language,
                stage = %stage,
                kind = error.kind(),
                error = %error,
                "Language failed"
            );
        }
    }
}
