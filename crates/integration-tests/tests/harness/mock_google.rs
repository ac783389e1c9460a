//! Mock Google backend for integration tests
//!
//! Serves the Vision `images:annotate`, Gemini `generateContent` and
//! Text-to-Speech `text:synthesize` calls plus a reference image download.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

use super::config::GOOGLE_KEY;

pub const IMAGE_BYTES: &[u8] = b"mock-png-bytes";
pub const AUDIO_BYTES: &[u8] = b"mock-audio-bytes";
pub const REFERENCE_BYTES: &[u8] = b"reference-image";

/// Mock Google APIs returning predictable payloads
pub struct MockGoogle {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockGoogleState>,
}

#[derive(Default)]
struct MockGoogleState {
    vision_count: AtomicU32,
    gemini_count: AtomicU32,
    tts_count: AtomicU32,
    reference_count: AtomicU32,
    /// Answer every API call with 500
    failing: AtomicBool,
    /// SafeSearch annotation returned by Vision; `None` answers without one
    annotation: Mutex<Option<Value>>,
    /// Last Gemini call as (model, body)
    last_gemini: Mutex<Option<(String, Value)>>,
    /// Last Text-to-Speech body
    last_tts: Mutex<Option<Value>>,
}

impl MockGoogle {
    /// Start the mock server, returning immediately
    pub async fn start() -> anyhow::Result<Self> {
        let state = Arc::new(MockGoogleState {
            annotation: Mutex::new(Some(json!({
                "adult": "VERY_UNLIKELY",
                "spoof": "UNLIKELY",
                "medical": "VERY_UNLIKELY",
                "violence": "UNLIKELY",
                "racy": "POSSIBLE"
            }))),
            ..MockGoogleState::default()
        });

        let app = Router::new()
            .route("/v1/images:annotate", routing::post(handle_annotate))
            .route("/v1beta/models/{call}", routing::post(handle_generate))
            .route("/v1/text:synthesize", routing::post(handle_synthesize))
            .route("/reference.jpg", routing::get(handle_reference))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL used for every Google API
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// URL of the reference image download
    pub fn reference_url(&self) -> String {
        format!("http://{}/reference.jpg", self.addr)
    }

    /// Make every API call fail with 500
    pub fn fail(&self) {
        self.state.failing.store(true, Ordering::Relaxed);
    }

    /// Replace the SafeSearch annotation; `None` answers with an empty response
    pub fn set_annotation(&self, annotation: Option<Value>) {
        *self.state.annotation.lock().unwrap() = annotation;
    }

    pub fn vision_count(&self) -> u32 {
        self.state.vision_count.load(Ordering::Relaxed)
    }

    pub fn gemini_count(&self) -> u32 {
        self.state.gemini_count.load(Ordering::Relaxed)
    }

    pub fn tts_count(&self) -> u32 {
        self.state.tts_count.load(Ordering::Relaxed)
    }

    pub fn reference_count(&self) -> u32 {
        self.state.reference_count.load(Ordering::Relaxed)
    }

    /// Model and body of the last Gemini call
    pub fn last_gemini(&self) -> Option<(String, Value)> {
        self.state.last_gemini.lock().unwrap().clone()
    }

    /// Body of the last Text-to-Speech call
    pub fn last_tts(&self) -> Option<Value> {
        self.state.last_tts.lock().unwrap().clone()
    }
}

impl Drop for MockGoogle {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

#[derive(serde::Deserialize)]
struct KeyQuery {
    key: Option<String>,
}

/// Shared key and failure checks, `Some` short-circuits the handler
fn reject(state: &MockGoogleState, query: &KeyQuery) -> Option<Response> {
    if query.key.as_deref() != Some(GOOGLE_KEY) {
        return Some((StatusCode::FORBIDDEN, "API key not valid").into_response());
    }

    if state.failing.load(Ordering::Relaxed) {
        return Some((StatusCode::INTERNAL_SERVER_ERROR, "mock google intentional failure").into_response());
    }

    None
}

async fn handle_annotate(
    State(state): State<Arc<MockGoogleState>>,
    Query(query): Query<KeyQuery>,
    Json(_body): Json<Value>,
) -> Response {
    state.vision_count.fetch_add(1, Ordering::Relaxed);

    if let Some(rejection) = reject(&state, &query) {
        return rejection;
    }

    let response = match state.annotation.lock().unwrap().clone() {
        Some(annotation) => json!({ "responses": [{ "safeSearchAnnotation": annotation }] }),
        None => json!({ "responses": [{}] }),
    };

    Json(response).into_response()
}

async fn handle_generate(
    State(state): State<Arc<MockGoogleState>>,
    Path(call): Path<String>,
    Query(query): Query<KeyQuery>,
    Json(body): Json<Value>,
) -> Response {
    state.gemini_count.fetch_add(1, Ordering::Relaxed);

    let Some(model) = call.strip_suffix(":generateContent") else {
        return StatusCode::NOT_FOUND.into_response();
    };
    *state.last_gemini.lock().unwrap() = Some((model.to_owned(), body));

    if let Some(rejection) = reject(&state, &query) {
        return rejection;
    }

    Json(json!({
        "candidates": [{
            "content": {
                "parts": [
                    { "text": "Here is your image" },
                    { "inlineData": { "mimeType": "image/png", "data": STANDARD.encode(IMAGE_BYTES) } }
                ]
            }
        }]
    }))
    .into_response()
}

async fn handle_synthesize(
    State(state): State<Arc<MockGoogleState>>,
    Query(query): Query<KeyQuery>,
    Json(body): Json<Value>,
) -> Response {
    state.tts_count.fetch_add(1, Ordering::Relaxed);
    *state.last_tts.lock().unwrap() = Some(body);

    if let Some(rejection) = reject(&state, &query) {
        return rejection;
    }

    Json(json!({ "audioContent": STANDARD.encode(AUDIO_BYTES) })).into_response()
}

async fn handle_reference(State(state): State<Arc<MockGoogleState>>) -> impl IntoResponse {
    state.reference_count.fetch_add(1, Ordering::Relaxed);
    ([(header::CONTENT_TYPE, "image/webp")], REFERENCE_BYTES)
}
