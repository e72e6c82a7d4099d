use crate::domain::narration::LanguageCode;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

/// Delivery instructions sent with every synthesis request
pub const DEFAULT_INSTRUCTIONS: &str = "\
Speak the text as if delivering a sermon to a Reformed Baptist congregation.
Use a clear, reverent, and pastoral tone.
Emphasize key theological points naturally, with slight pauses.
Speak slowly and clearly, suitable for reading aloud.
Maintain warmth and authority in the voice.";

/// Maximum bytes per synthesis request (the service caps input at 4096 characters)
pub const DEFAULT_MAX_CHUNK_SIZE: usize = 4000;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub tts_model: String,
    pub tts_voice: String,
    pub tts_instructions: String,
    pub languages: Vec<LanguageCode>,
    pub translations_dir: PathBuf,
    pub audio_dir: PathBuf,
    /// Parent directory for per-language scratch space, OS temp dir when unset
    pub scratch_dir: Option<PathBuf>,
    pub max_chunk_size: usize,
    pub synthesis_concurrency: usize,
    pub ffmpeg_path: PathBuf,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Fixed voice parameters, identical for every section of every language.
/// Keeping them constant is what makes byte-level concatenation valid.
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceConfig {
    pub model: String,
    pub voice: String,
    pub instructions: String,
    pub response_format: String,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let languages = parse_languages(&env::var("LANGUAGES")?)?;

        let config = Config {
            openai_api_key: env::var("OPENAI_API_KEY")?,
            openai_base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            tts_model: env::var("TTS_MODEL").unwrap_or_else(|_| "gpt-4o-mini-tts".to_string()),
            tts_voice: env::var("TTS_VOICE").unwrap_or_else(|_| "ash".to_string()),
            tts_instructions: env::var("TTS_INSTRUCTIONS")
                .unwrap_or_else(|_| DEFAULT_INSTRUCTIONS.to_string()),
            languages,
            translations_dir: env::var("TRANSLATIONS_DIR")
                .unwrap_or_else(|_| "./translations".to_string())
                .into(),
            audio_dir: env::var("AUDIO_DIR")
                .unwrap_or_else(|_| "./audio".to_string())
                .into(),
            scratch_dir: env::var("SCRATCH_DIR").ok().map(PathBuf::from),
            max_chunk_size: parse_positive(
                "MAX_CHUNK_SIZE",
                env::var("MAX_CHUNK_SIZE").ok(),
                DEFAULT_MAX_CHUNK_SIZE,
            )?,
            synthesis_concurrency: parse_positive(
                "SYNTHESIS_CONCURRENCY",
                env::var("SYNTHESIS_CONCURRENCY").ok(),
                4,
            )?,
            ffmpeg_path: env::var("FFMPEG_PATH")
                .unwrap_or_else(|_| "ffmpeg".to_string())
                .into(),
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                })?,
        };

        Ok(config)
    }

    pub fn voice(&self) -> VoiceConfig {
        VoiceConfig {
            model: self.tts_model.clone(),
            voice: self.tts_voice.clone(),
            instructions: self.tts_instructions.clone(),
            response_format: "mp3".to_string(),
        }
    }

    /// `{translations_dir}/{lang}.txt`
    pub fn input_path(&self, language: &LanguageCode) -> PathBuf {
        self.translations_dir.join(format!("{}.txt", language))
    }

    /// `{audio_dir}/{lang}.mp3`
    pub fn output_path(&self, language: &LanguageCode) -> PathBuf {
        self.audio_dir.join(format!("{}.mp3", language))
    }

    pub fn scratch_root(&self) -> PathBuf {
        self.scratch_dir.clone().unwrap_or_else(env::temp_dir)
    }
}

fn parse_languages(raw: &str) -> Result<Vec<LanguageCode>, Box<dyn std::error::Error>> {
    let languages = LanguageCode::parse_list(raw).map_err(|e| format!("LANGUAGES: {}", e))?;
    if languages.is_empty() {
        return Err("LANGUAGES must name at least one language".into());
    }
    Ok(languages)
}

fn parse_positive(
    name: &str,
    raw: Option<String>,
    default: usize,
) -> Result<usize, Box<dyn std::error::Error>> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    let value: usize = raw
        .trim()
        .parse()
        .map_err(|e| format!("{} must be a positive integer: {}", name, e))?;
    if value == 0 {
        return Err(format!("{} must be at least 1", name).into());
    }
    Ok(value)
}
