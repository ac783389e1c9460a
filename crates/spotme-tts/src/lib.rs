#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod error;
mod provider;
mod server;
mod types;

use std::sync::Arc;

use axum::{Json, Router, extract::State};
use spotme_core::{JsonPayload, post_endpoint};
use spotme_storage::StorageClient;

pub use error::{Result, TtsError};
pub use provider::SpeechProvider;
pub use server::Server;
pub use types::{SpeechRequest, SpeechResponse, Synthesis};

use server::TtsServerBuilder;

/// Build the TTS server from configuration
pub fn build_server(config: &spotme_config::Config, http: reqwest::Client, storage: Arc<StorageClient>) -> Arc<Server> {
    Arc::new(TtsServerBuilder::new(config, http, storage).build())
}

/// Create the endpoint router for TTS
pub fn endpoint_router() -> Router<Arc<Server>> {
    Router::new().route("/generate-tts", post_endpoint(synthesize))
}

/// Handle speech synthesis requests
async fn synthesize(
    State(server): State<Arc<Server>>,
    JsonPayload(request): JsonPayload<SpeechRequest>,
) -> Result<Json<SpeechResponse>> {
    let response = server.synthesize(request).await?;

    tracing::info!(source = ?response.source, "speech synthesized");

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use http_body_util::BodyExt;
    use secrecy::SecretString;
    use serde_json::{Value, json};
    use spotme_config::Config;
    use tower::ServiceExt;
    use url::Url;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{header, method, path_regex},
    };

    use super::*;

    fn router(google: &MockServer, storage: Option<&MockServer>, google_key: bool) -> Router {
        let mut config = Config::default();
        config.google.tts_url = Url::parse(&google.uri()).unwrap();
        config.google.api_key = google_key.then(|| SecretString::from("g".to_owned()));
        if let Some(storage) = storage {
            config.storage.endpoint = Url::parse(&storage.uri()).unwrap();
            config.storage.api_key = Some(SecretString::from("s".to_owned()));
        }

        let http = reqwest::Client::new();
        let storage = spotme_storage::build_client(&config, http.clone()).unwrap();
        endpoint_router().with_state(build_server(&config, http, storage))
    }

    async fn post(router: Router, body: Value) -> (u16, Value) {
        let request = axum::http::Request::builder()
            .method("POST")
            .uri("/generate-tts")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = router.oneshot(request).await.unwrap();
        let status = response.status().as_u16();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn google_returns(google: &MockServer, template: ResponseTemplate) {
        Mock::given(method("POST")).respond_with(template).mount(google).await;
    }

    #[tokio::test]
    async fn missing_text_is_400() {
        let google = MockServer::start().await;
        let (status, body) = post(router(&google, None, true), json!({ "voice": "x" })).await;

        assert_eq!(status, 400);
        assert_eq!(body, json!({ "error": "Missing text" }));
    }

    #[tokio::test]
    async fn missing_key_is_500() {
        let google = MockServer::start().await;
        let (status, body) = post(router(&google, None, false), json!({ "text": "boo" })).await;

        assert_eq!(status, 500);
        assert_eq!(body, json!({ "error": "GOOGLE_AI_API_KEY not configured" }));
    }

    #[tokio::test]
    async fn provider_error_carries_details() {
        let google = MockServer::start().await;
        google_returns(&google, ResponseTemplate::new(403).set_body_string("denied")).await;

        let (status, body) = post(router(&google, None, true), json!({ "text": "boo" })).await;

        assert_eq!(status, 500);
        assert_eq!(body, json!({ "error": "TTS generation failed", "details": "denied" }));
    }

    #[tokio::test]
    async fn no_audio_is_500() {
        let google = MockServer::start().await;
        google_returns(&google, ResponseTemplate::new(200).set_body_json(json!({}))).await;

        let (status, body) = post(router(&google, None, true), json!({ "text": "boo" })).await;

        assert_eq!(status, 500);
        assert_eq!(body, json!({ "error": "No audio generated" }));
    }

    #[tokio::test]
    async fn stored_audio_returns_url() {
        let google = MockServer::start().await;
        let storage = MockServer::start().await;
        google_returns(&google, ResponseTemplate::new(200).set_body_json(json!({ "audioContent": "SUQz" }))).await;
        Mock::given(method("PUT"))
            .and(path_regex(r"^/spotme/audio/\d+-[0-9a-f]{8}\.mp3$"))
            .and(header("content-type", "audio/mpeg"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&storage)
            .await;

        let (status, body) = post(router(&google, Some(&storage), true), json!({ "text": "boo" })).await;

        assert_eq!(status, 200);
        assert_eq!(body["source"], "bunny-cdn");
        assert!(body["audioUrl"].as_str().unwrap().starts_with("https://spotme.b-cdn.net/audio/"));
        assert!(body.get("audioData").is_none());
    }

    #[tokio::test]
    async fn failed_upload_returns_inline_audio() {
        let google = MockServer::start().await;
        let storage = MockServer::start().await;
        google_returns(&google, ResponseTemplate::new(200).set_body_json(json!({ "audioContent": "SUQz" }))).await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&storage)
            .await;

        let (status, body) = post(router(&google, Some(&storage), true), json!({ "text": "boo" })).await;

        assert_eq!(status, 200);
        assert_eq!(
            body,
            json!({ "success": true, "audioData": "data:audio/mp3;base64,SUQz", "source": "base64-fallback" })
        );
    }
}
