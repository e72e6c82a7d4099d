use narrate::domain::narration::NarrationService;
use narrate::infrastructure::audio::FfmpegConcatenator;
use narrate::infrastructure::config::{Config, LogFormat};
use narrate::infrastructure::repositories::OpenAiTtsRepository;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!("{}", e))?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        languages = ?config.languages.iter().map(|l| l.as_str()).collect::<Vec<_>>(),
        model = %config.tts_model,
        voice = %config.tts_voice,
        max_chunk_size = config.max_chunk_size,
        synthesis_concurrency = config.synthesis_concurrency,
        "Starting narration"
    );

    let config = Arc::new(config);

    let tts_repo = Arc::new(OpenAiTtsRepository::new(
        reqwest::Client::new(),
        config.openai_base_url.clone(),
        config.openai_api_key.clone(),
    ));
    let concatenator = Arc::new(FfmpegConcatenator::new(config.ffmpeg_path.clone()));

    let service = NarrationService::new(config.clone(), tts_repo, concatenator);
    let report = service.run(&config.languages).await;
    report.log_summary();

    if report.has_failures() {
        anyhow::bail!("{} language(s) failed", report.failed().len());
    }

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "narrate=info".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "narrate=info".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
