//! Mock edge storage for integration tests

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use serde_json::json;
use tokio_util::sync::CancellationToken;

use super::config::STORAGE_KEY;

/// An object received by the mock
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub zone: String,
    pub key: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Mock storage zone accepting `PUT /{zone}/{key}`
pub struct MockStorage {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockStorageState>,
}

#[derive(Default)]
struct MockStorageState {
    failing: AtomicBool,
    objects: Mutex<Vec<StoredObject>>,
}

impl MockStorage {
    /// Start the mock server, returning immediately
    pub async fn start() -> anyhow::Result<Self> {
        let state = Arc::new(MockStorageState::default());

        let app = Router::new()
            .route("/{zone}/{*key}", routing::put(handle_put))
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

    /// Storage endpoint URL
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Make every upload fail with 500
    pub fn fail(&self) {
        self.state.failing.store(true, Ordering::Relaxed);
    }

    /// Objects received so far
    pub fn objects(&self) -> Vec<StoredObject> {
        self.state.objects.lock().unwrap().clone()
    }

    /// Poll until an object lands under `key`
    pub async fn wait_for(&self, key: &str) -> Option<StoredObject> {
        for _ in 0..100 {
            if let Some(object) = self.objects().into_iter().find(|o| o.key == key) {
                return Some(object);
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        None
    }
}

impl Drop for MockStorage {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_put(
    State(state): State<Arc<MockStorageState>>,
    Path((zone, key)): Path<(String, String)>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if headers.get("AccessKey").and_then(|v| v.to_str().ok()) != Some(STORAGE_KEY) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "HttpCode": 401, "Message": "Unauthorized" }))).into_response();
    }

    if state.failing.load(Ordering::Relaxed) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "mock storage intentional failure").into_response();
    }

    state.objects.lock().unwrap().push(StoredObject {
        zone,
        key,
        content_type: headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned),
        bytes: body.to_vec(),
    });

    (StatusCode::CREATED, Json(json!({ "HttpCode": 201, "Message": "File uploaded." }))).into_response()
}
