use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// Input text that the stub rejects with HTTP 429
pub const REJECTED_INPUT: &str = "over quota";

/// Request as received by the stub
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Clone, Default)]
struct StubState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// In-process stand-in for `POST /v1/audio/speech`.
/// Answers with `AUDIO[<input>]` as the audio body.
pub struct SpeechStub {
    pub base_url: String,
    state: StubState,
}

impl SpeechStub {
    pub async fn start() -> Self {
        let state = StubState::default();

        let app = Router::new()
            .route("/v1/audio/speech", post(speech))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind listener");
        let addr = listener.local_addr().expect("Failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}/v1", addr),
            state,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }
}

async fn speech(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let input = body
        .get("input")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    state.requests.lock().unwrap().push(RecordedRequest {
        authorization,
        body,
    });

    if input == REJECTED_INPUT {
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({ "error": { "message": "You exceeded your current quota" } })),
        )
            .into_response();
    }

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "audio/mpeg")],
        format!("AUDIO[{}]", input).into_bytes(),
    )
        .into_response()
}
