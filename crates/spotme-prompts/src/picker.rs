use rand::{Rng, seq::IndexedRandom};
use serde::Serialize;

use crate::catalog::{self, CATEGORIES, TEMPLATES};

/// One picked prompt/narration/template triple
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pick {
    pub success: bool,
    pub category: &'static str,
    pub prompt: &'static str,
    pub narration: &'static str,
    pub template: &'static str,
    pub available_categories: Vec<&'static str>,
}

/// Pick from `requested` when it names a known category, otherwise from a random one
///
/// Prompt, narration and template are drawn independently.
pub fn pick<R: Rng + ?Sized>(requested: Option<&str>, rng: &mut R) -> Pick {
    let category = requested
        .and_then(catalog::find)
        .or_else(|| CATEGORIES.choose(rng))
        .unwrap_or(&CATEGORIES[0]);

    Pick {
        success: true,
        category: category.name,
        prompt: choose(category.prompts, rng),
        narration: choose(category.narrations, rng),
        template: choose(&TEMPLATES, rng),
        available_categories: catalog::names(),
    }
}

fn choose<R: Rng + ?Sized>(items: &[&'static str], rng: &mut R) -> &'static str {
    items.choose(rng).copied().unwrap_or_default()
}
