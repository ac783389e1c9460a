use strum::{Display, EnumString};

/// Vision SafeSearch likelihood, ordered from least to most likely
///
/// `Unknown` sorts lowest so it never flags an image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Display, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Likelihood {
    #[default]
    Unknown,
    VeryUnlikely,
    Unlikely,
    Possible,
    Likely,
    VeryLikely,
}

impl Likelihood {
    /// Parse a wire value; unrecognized strings read as [`Likelihood::Unknown`]
    pub fn parse(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }

    /// `LIKELY` or `VERY_LIKELY`
    pub fn is_flagged(self) -> bool {
        self >= Self::Likely
    }
}
