use async_trait::async_trait;
use narrate::infrastructure::audio::Concatenator;
use narrate::infrastructure::config::VoiceConfig;
use narrate::infrastructure::repositories::TtsRepository;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

/// Marker written for a section, standing in for its audio frames
pub fn marker(text: &str) -> String {
    format!("<{}>", text)
}

/// Writes `<section text>` as the segment content.
/// Any section containing `fail_on` is rejected like a quota error.
#[derive(Default)]
pub struct FakeTtsRepository {
    fail_on: Option<String>,
    jitter: bool,
    calls: Mutex<Vec<String>>,
}

impl FakeTtsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(trigger: &str) -> Self {
        Self {
            fail_on: Some(trigger.to_string()),
            ..Self::default()
        }
    }

    /// Delay each response by less than the call before it, so concurrent
    /// calls complete in reverse of the order they were started
    pub fn with_jitter(mut self) -> Self {
        self.jitter = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TtsRepository for FakeTtsRepository {
    async fn synthesize_to_file(
        &self,
        text: &str,
        _voice: &VoiceConfig,
        destination: &Path,
    ) -> Result<u64, String> {
        let position = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(text.to_string());
            calls.len() as u64 - 1
        };

        if self.jitter {
            let delay = 5 + 3 * 40u64.saturating_sub(position);
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }

        if let Some(trigger) = &self.fail_on {
            if text.contains(trigger.as_str()) {
                return Err("OpenAI TTS error: HTTP 429: quota exceeded".to_string());
            }
        }

        let bytes = marker(text).into_bytes();
        tokio::fs::write(destination, &bytes)
            .await
            .map_err(|e| e.to_string())?;
        Ok(bytes.len() as u64)
    }
}

/// Concatenates the manifest's files byte by byte, in manifest order
#[derive(Default)]
pub struct ByteConcatenator {
    manifests: Mutex<Vec<Vec<PathBuf>>>,
}

impl ByteConcatenator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries of every manifest seen, in call order
    pub fn manifests(&self) -> Vec<Vec<PathBuf>> {
        self.manifests.lock().unwrap().clone()
    }
}

pub fn parse_manifest(text: &str) -> Vec<PathBuf> {
    text.lines()
        .filter_map(|line| line.strip_prefix("file '"))
        .filter_map(|rest| rest.strip_suffix('\''))
        .map(|quoted| PathBuf::from(quoted.replace(r"'\''", "'")))
        .collect()
}

#[async_trait]
impl Concatenator for ByteConcatenator {
    async fn concat(&self, manifest: &Path, output: &Path) -> Result<(), String> {
        let text = std::fs::read_to_string(manifest).map_err(|e| e.to_string())?;
        let entries = parse_manifest(&text);

        let mut joined = Vec::new();
        for entry in &entries {
            let bytes = std::fs::read(entry).map_err(|e| e.to_string())?;
            joined.extend(bytes);
        }
        std::fs::write(output, joined).map_err(|e| e.to_string())?;

        self.manifests.lock().unwrap().push(entries);
        Ok(())
    }
}

/// Behaves like ffmpeg exiting non-zero after creating a partial output
pub struct FailingConcatenator;

#[async_trait]
impl Concatenator for FailingConcatenator {
    async fn concat(&self, _manifest: &Path, output: &Path) -> Result<(), String> {
        std::fs::write(output, b"partial").map_err(|e| e.to_string())?;
        Err("ffmpeg exited with exit status: 1: Invalid data found".to_string())
    }
}
