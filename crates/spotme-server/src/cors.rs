//! Response envelope: cross-origin headers and a JSON content type on every response

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::{
    HeaderMap, HeaderValue,
    header::{
        ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
        ACCESS_CONTROL_MAX_AGE, CONTENT_TYPE, ORIGIN, VARY,
    },
};
use spotme_config::{AnyOrArray, CorsConfig};

#[derive(Debug, Clone)]
enum AllowedOrigins {
    Any,
    List(Vec<HeaderValue>),
}

/// Precomputed cross-origin header values
#[derive(Debug, Clone)]
pub struct CorsHeaders {
    origins: AllowedOrigins,
    allow_methods: HeaderValue,
    allow_headers: HeaderValue,
    max_age: Option<HeaderValue>,
}

impl CorsHeaders {
    /// Build header values from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a configured value is not a valid header value
    pub fn from_config(config: &CorsConfig) -> anyhow::Result<Self> {
        let origins = match &config.origins {
            AnyOrArray::Any => AllowedOrigins::Any,
            AnyOrArray::List(origins) => AllowedOrigins::List(
                origins
                    .iter()
                    .map(|origin| header_value("server.cors.origins", origin))
                    .collect::<anyhow::Result<_>>()?,
            ),
        };

        Ok(Self {
            origins,
            allow_methods: header_value("server.cors.methods", &config.methods.to_header_value())?,
            allow_headers: header_value("server.cors.headers", &config.headers.to_header_value())?,
            max_age: config.max_age.map(HeaderValue::from),
        })
    }

    /// Attach the headers for a request that carried `origin`
    ///
    /// With an origin list, only a listed origin is echoed back.
    pub fn apply(&self, origin: Option<&HeaderValue>, headers: &mut HeaderMap) {
        match &self.origins {
            AllowedOrigins::Any => {
                headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
            }
            AllowedOrigins::List(allowed) => {
                headers.append(VARY, HeaderValue::from_static("Origin"));
                if let Some(origin) = origin.filter(|origin| allowed.contains(origin)) {
                    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin.clone());
                }
            }
        }

        headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, self.allow_headers.clone());
        headers.insert(ACCESS_CONTROL_ALLOW_METHODS, self.allow_methods.clone());

        if let Some(max_age) = &self.max_age {
            headers.insert(ACCESS_CONTROL_MAX_AGE, max_age.clone());
        }
    }
}

fn header_value(field: &str, value: &str) -> anyhow::Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| anyhow::anyhow!("invalid {field} value `{value}`: {e}"))
}

/// Middleware adding the envelope headers to every response, errors included
pub async fn envelope_middleware(State(cors): State<Arc<CorsHeaders>>, request: Request, next: Next) -> Response {
    let origin = request.headers().get(ORIGIN).cloned();

    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    cors.apply(origin.as_ref(), headers);

    if !headers.contains_key(CONTENT_TYPE) {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }

    response
}
