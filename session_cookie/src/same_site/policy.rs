use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::errors::CookieError;

/// Value of the `SameSite` cookie attribute.
///
/// `Default` leaves the attribute out of the `Set-Cookie` header so the
/// browser applies its own default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SameSite {
    #[default]
    Default,
    Lax,
    Strict,
    None,
}

impl SameSite {
    /// Attribute value as written in `Set-Cookie`, if any
    pub fn attribute_value(self) -> Option<&'static str> {
        match self {
            SameSite::Default => None,
            SameSite::Lax => Some("Lax"),
            SameSite::Strict => Some("Strict"),
            SameSite::None => Some("None"),
        }
    }
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.attribute_value().unwrap_or("Default"))
    }
}

/// Parses a configured SameSite value.
///
/// Only the exact lowercase spellings are accepted, and an empty string maps
/// to [`SameSite::Default`]. Anything else is a configuration error and
/// should stop startup.
pub fn parse_same_site(value: &str) -> Result<SameSite, CookieError> {
    match value {
        "lax" => Ok(SameSite::Lax),
        "strict" => Ok(SameSite::Strict),
        "none" => Ok(SameSite::None),
        "" => Ok(SameSite::Default),
        other => Err(CookieError::InvalidSameSite(other.to_string())),
    }
}

impl FromStr for SameSite {
    type Err = CookieError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_same_site(s)
    }
}
