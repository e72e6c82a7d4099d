use super::tts_repository::TtsRepository;
use crate::infrastructure::config::VoiceConfig;
use async_trait::async_trait;
use futures::StreamExt;
use serde::Serialize;
use std::path::Path;
use tokio::io::AsyncWriteExt;

/// Body of `POST /audio/speech`
#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    voice: &'a str,
    input: &'a str,
    #[serde(skip_serializing_if = "is_blank")]
    instructions: &'a str,
    response_format: &'a str,
}

fn is_blank(value: &&str) -> bool {
    value.trim().is_empty()
}

/// OpenAI TTS implementation of TTS repository.
/// Streams the response body straight to disk instead of buffering it.
pub struct OpenAiTtsRepository {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenAiTtsRepository {
    pub fn new(client: reqwest::Client, base_url: String, api_key: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn speech_url(&self) -> String {
        format!("{}/audio/speech", self.base_url)
    }

    async fn stream_to_file(
        response: reqwest::Response,
        destination: &Path,
    ) -> Result<u64, String> {
        let mut file = tokio::fs::File::create(destination)
            .await
            .map_err(|e| format!("Failed to create segment {}: {}", destination.display(), e))?;

        let mut stream = response.bytes_stream();
        let mut written: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| format!("Failed to read audio stream: {}", e))?;
            file.write_all(&chunk)
                .await
                .map_err(|e| format!("Failed to write segment {}: {}", destination.display(), e))?;
            written += chunk.len() as u64;
        }

        file.flush()
            .await
            .map_err(|e| format!("Failed to flush segment {}: {}", destination.display(), e))?;

        Ok(written)
    }
}

#[async_trait]
impl TtsRepository for OpenAiTtsRepository {
    async fn synthesize_to_file(
        &self,
        text: &str,
        voice: &VoiceConfig,
        destination: &Path,
    ) -> Result<u64, String> {
        let start_time = std::time::Instant::now();

        tracing::debug!(
            model = %voice.model,
            voice = %voice.voice,
            text_length = text.len(),
            text_preview = %text.chars().take(200).collect::<String>(),
            "Calling OpenAI TTS API"
        );

        let request = SpeechRequest {
            model: &voice.model,
            voice: &voice.voice,
            input: text,
            instructions: &voice.instructions,
            response_format: &voice.response_format,
        };

        let response = self
            .client
            .post(self.speech_url())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    model = %voice.model,
                    text_length = text.len(),
                    "OpenAI TTS API call failed"
                );
                format!("OpenAI TTS error: {}", e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = status.as_u16(),
                body = %body,
                model = %voice.model,
                "OpenAI TTS API rejected the request"
            );
            return Err(format!("OpenAI TTS error: HTTP {}: {}", status.as_u16(), body));
        }

        let written = Self::stream_to_file(response, destination).await?;
        if written == 0 {
            return Err("OpenAI TTS error: empty audio stream".to_string());
        }

        tracing::debug!(
            provider = "openai",
            latency_ms = start_time.elapsed().as_millis(),
            audio_size_bytes = written,
            segment = %destination.display(),
            "Audio stream written"
        );

        Ok(written)
    }
}
