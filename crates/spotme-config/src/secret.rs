use secrecy::SecretString;
use serde::{Deserialize, Deserializer};

/// Deserialize an optional secret, treating blank values as absent
///
/// Placeholders such as `{{ env.BUNNY_API_KEY | default("") }}` expand to an
/// empty string when the variable is unset; that must read as "not
/// configured" rather than as a key consisting of nothing.
pub fn optional_secret<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;

    Ok(value
        .map(|raw| raw.trim().to_owned())
        .filter(|raw| !raw.is_empty())
        .map(SecretString::from))
}
