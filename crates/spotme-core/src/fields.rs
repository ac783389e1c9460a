//! Lenient field readers for request payloads

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Read an optional string field, treating anything but a non-empty string as absent
///
/// Use with `#[serde(default, deserialize_with = "...")]` so a `null`, a
/// number or `""` all behave like a missing field instead of failing the whole
/// payload.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;

    Ok(match value {
        Some(Value::String(text)) if !text.is_empty() => Some(text),
        _ => None,
    })
}
