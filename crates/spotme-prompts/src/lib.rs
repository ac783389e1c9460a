#![allow(clippy::must_use_candidate)]

mod catalog;
mod picker;

use axum::{
    Json, Router,
    routing::{MethodRouter, get},
};
use serde::Deserialize;
use spotme_core::{
    JsonPayload,
    gate::{method_not_allowed, preflight},
};

pub use catalog::{CATEGORIES, Category, TEMPLATES};
pub use picker::{Pick, pick};

#[derive(Debug, Deserialize)]
pub struct PromptRequest {
    #[serde(default, deserialize_with = "spotme_core::fields::lenient_string")]
    pub category: Option<String>,
}

/// Create the endpoint router for the prompt picker
///
/// Accepts both GET and POST.
pub fn endpoint_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let route: MethodRouter<S> = get(random_prompt)
        .post(random_prompt)
        .options(preflight)
        .fallback(method_not_allowed);

    Router::new().route("/random-prompt", route)
}

async fn random_prompt(JsonPayload(request): JsonPayload<PromptRequest>) -> Json<Pick> {
    let pick = pick(request.category.as_deref(), &mut rand::rng());

    tracing::debug!(category = pick.category, template = pick.template, "prompt picked");

    Json(pick)
}
