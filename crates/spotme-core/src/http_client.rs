use std::time::Duration;

use reqwest::{
    Client,
    header::{CONNECTION, HeaderMap, HeaderValue},
};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Build the outbound HTTP client shared by all provider calls
///
/// One client is created at startup and cloned into each endpoint so every
/// provider reuses the same connection pool.
pub fn http_client(timeout: Duration) -> reqwest::Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));

    Client::builder()
        .timeout(timeout)
        .connect_timeout(CONNECT_TIMEOUT.min(timeout))
        .pool_idle_timeout(Some(Duration::from_secs(90)))
        .pool_max_idle_per_host(16)
        .tcp_nodelay(true)
        .tcp_keepalive(Some(Duration::from_secs(60)))
        .user_agent(concat!("spotme/", env!("CARGO_PKG_VERSION")))
        .default_headers(headers)
        .build()
}
