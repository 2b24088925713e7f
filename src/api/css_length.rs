use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BarViewError;

/// CSS length accepted for the `width`/`height` options.
///
/// Only the forms a bar view needs are supported: `Npx`, `N%` and a bare
/// number of pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CssLength {
    Pixels(f64),
    Percent(f64),
}

impl CssLength {
    pub const FULL: Self = Self::Percent(100.0);

    /// Resolves against the parent's measured size, floored to whole pixels.
    #[must_use]
    pub fn resolve(self, parent_px: u32) -> u32 {
        let resolved = match self {
            Self::Pixels(px) => px,
            Self::Percent(percent) => f64::from(parent_px) * percent / 100.0,
        };
        resolved.floor() as u32
    }
}

impl Default for CssLength {
    fn default() -> Self {
        Self::FULL
    }
}

impl FromStr for CssLength {
    type Err = BarViewError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let (number, build): (&str, fn(f64) -> Self) =
            if let Some(number) = trimmed.strip_suffix("px") {
                (number, Self::Pixels)
            } else if let Some(number) = trimmed.strip_suffix('%') {
                (number, Self::Percent)
            } else {
                (trimmed, Self::Pixels)
            };

        match number.trim().parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => Ok(build(value)),
            _ => Err(BarViewError::InvalidOption(format!(
                "invalid CSS length `{input}`"
            ))),
        }
    }
}

impl TryFrom<String> for CssLength {
    type Error = BarViewError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CssLength> for String {
    fn from(value: CssLength) -> Self {
        value.to_string()
    }
}

impl fmt::Display for CssLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pixels(px) => write!(f, "{px}px"),
            Self::Percent(percent) => write!(f, "{percent}%"),
        }
    }
}
