mod cors;
mod health;
mod panic;

use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use spotme_config::Config;
use spotme_core::gate::not_found;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use cors::CorsHeaders;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// Endpoints are mounted under `server.base_path`; the health route is
    /// mounted at the root.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client, storage client or CORS headers
    /// cannot be built from configuration
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

        let http = spotme_core::http_client(config.google.timeout()?)
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {e}"))?;

        let storage = spotme_storage::build_client(config, http.clone())?;
        let moderation = spotme_moderation::build_service(config, http.clone());
        let imagegen = spotme_imagegen::build_server(config, http.clone(), Arc::clone(&storage));
        let tts = spotme_tts::build_server(config, http, Arc::clone(&storage));

        // Endpoint routes
        let api = Router::new()
            .merge(spotme_moderation::endpoint_router().with_state(moderation))
            .merge(spotme_storage::endpoint_router().with_state(storage))
            .merge(spotme_imagegen::endpoint_router().with_state(imagegen))
            .merge(spotme_tts::endpoint_router().with_state(tts))
            .merge(spotme_prompts::endpoint_router());

        let base_path = config.server.base_path.as_str();
        let mut app = if base_path.is_empty() {
            api
        } else {
            Router::new().nest(base_path, api)
        };

        // Health check
        if config.server.health.enabled {
            app = app.route(&config.server.health.path, axum::routing::get(health::health_handler));
        }

        app = app.fallback(not_found);

        let cors = CorsHeaders::from_config(&config.server.cors)?;

        tracing::debug!(base_path, "routes mounted");

        Ok(Self {
            router: with_layers(app, cors),
            listen_address,
        })
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}

/// Wrap routes in the panic boundary, request tracing and the response envelope
///
/// The envelope is outermost so a caught panic still gets CORS headers.
fn with_layers(app: Router, cors: CorsHeaders) -> Router {
    app.layer(CatchPanicLayer::custom(panic::panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn_with_state(Arc::new(cors), cors::envelope_middleware))
}
