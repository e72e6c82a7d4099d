use crate::infrastructure::config::VoiceConfig;
use async_trait::async_trait;
use std::path::Path;

/// Repository for speech synthesis calls.
/// Abstracts the underlying TTS provider so the pipeline can be driven by fakes.
///
/// Implementations issue exactly one request per call and never retry.
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Synthesize one section of text, streaming the audio into `destination`.
    ///
    /// Returns the number of audio bytes written.
    ///
    /// # Arguments
    /// * `text` - A single section, already bounded by the provider's input limit
    /// * `voice` - Fixed voice parameters shared by every call in a run
    /// * `destination` - Segment file to create; the caller owns its cleanup
    ///
    /// # Errors
    /// Returns error if the request fails, the provider rejects it, or the
    /// stream cannot be written
    async fn synthesize_to_file(
        &self,
        text: &str,
        voice: &VoiceConfig,
        destination: &Path,
    ) -> Result<u64, String>;
}
