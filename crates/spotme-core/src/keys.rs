//! Object key construction for stored assets

use std::fmt::Write as _;

/// Milliseconds since the Unix epoch
pub fn unix_millis() -> i64 {
    jiff::Timestamp::now().as_millisecond()
}

/// Lowercase hex of `bytes` random bytes
pub fn random_hex(bytes: usize) -> String {
    (0..bytes).fold(String::with_capacity(bytes * 2), |mut hex, _| {
        let _ = write!(hex, "{:02x}", rand::random::<u8>());
        hex
    })
}

/// Build a collision-resistant key: `<prefix>/<millis>-<8 hex><tail>`
///
/// `tail` is appended verbatim, e.g. `.jpg` or `-photo.png`.
pub fn object_key(prefix: &str, tail: &str) -> String {
    format!("{prefix}/{}-{}{tail}", unix_millis(), random_hex(4))
}
