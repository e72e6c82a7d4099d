use crate::e2e::helpers;

use helpers::fakes::ByteConcatenator;
use helpers::speech_stub::{SpeechStub, REJECTED_INPUT};
use helpers::{code, codes, TestContext};
use narrate::infrastructure::repositories::{OpenAiTtsRepository, TtsRepository};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use test_context::test_context;

fn repository(stub: &SpeechStub) -> OpenAiTtsRepository {
    OpenAiTtsRepository::new(
        reqwest::Client::new(),
        stub.base_url.clone(),
        "sk-test".to_string(),
    )
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_stream_speech_into_the_segment_file(ctx: &mut TestContext) {
    let stub = SpeechStub::start().await;
    let repo = repository(&stub);
    let destination = ctx.config.scratch_root().join("en_0000.mp3");

    let written = repo
        .synthesize_to_file("Grace and peace", &ctx.config.voice(), &destination)
        .await
        .unwrap();

    let audio = std::fs::read_to_string(&destination).unwrap();
    assert_eq!(audio, "AUDIO[Grace and peace]");
    assert_eq!(written, audio.len() as u64);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_send_fixed_voice_parameters(ctx: &mut TestContext) {
    let stub = SpeechStub::start().await;
    let repo = repository(&stub);
    let voice = ctx.config.voice();
    let destination = ctx.config.scratch_root().join("es_0000.mp3");

    repo.synthesize_to_file("Hola", &voice, &destination)
        .await
        .unwrap();

    let requests = stub.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].authorization.as_deref(), Some("Bearer sk-test"));
    assert_eq!(
        requests[0].body,
        json!({
            "model": "gpt-4o-mini-tts",
            "voice": "ash",
            "input": "Hola",
            "instructions": voice.instructions,
            "response_format": "mp3"
        })
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_surface_rejected_requests_without_retrying(ctx: &mut TestContext) {
    let stub = SpeechStub::start().await;
    let repo = repository(&stub);
    let destination = ctx.config.scratch_root().join("en_0000.mp3");

    let error = repo
        .synthesize_to_file(REJECTED_INPUT, &ctx.config.voice(), &destination)
        .await
        .unwrap_err();

    assert!(error.contains("429"), "unexpected error: {}", error);
    assert!(error.contains("quota"), "unexpected error: {}", error);
    assert_eq!(stub.requests().len(), 1);
    assert!(!destination.exists());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_unreachable_service(ctx: &mut TestContext) {
    // Nothing listens on the discard port
    let repo = OpenAiTtsRepository::new(
        reqwest::Client::new(),
        "http://127.0.0.1:9/v1".to_string(),
        "sk-test".to_string(),
    );
    let destination = ctx.config.scratch_root().join("en_0000.mp3");

    let error = repo
        .synthesize_to_file("Hello", &ctx.config.voice(), &destination)
        .await
        .unwrap_err();

    assert!(error.starts_with("OpenAI TTS error"), "unexpected error: {}", error);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_narrate_through_the_http_repository(ctx: &mut TestContext) {
    let stub = SpeechStub::start().await;
    ctx.write_translation("es", "En el principio\nera el Verbo");

    let service = ctx.service(
        Arc::new(repository(&stub)),
        Arc::new(ByteConcatenator::new()),
    );
    let report = service.run(&codes("es")).await;

    assert!(report.outcome(&code("es")).unwrap().is_done());
    assert_eq!(
        ctx.read_output("es"),
        "AUDIO[En el principio]AUDIO[era el Verbo]"
    );
    assert_eq!(stub.requests().len(), 2);
}
