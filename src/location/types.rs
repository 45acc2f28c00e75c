//! Core types for the location subsystem.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder shown when no flag can be derived.
pub const WHITE_FLAG: &str = "\u{1F3F3}\u{FE0F}";

/// Countries kept when no allow-list is configured.
pub const DEFAULT_COUNTRIES: &[&str] = &["DE", "CH", "AT"];

/// A settlement from the place dataset.
///
/// Population is only used for ordering at load time and is not kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    /// Administrative region (Bundesland, canton); may be empty.
    pub state: String,
    /// Flag emoji for the country
    pub flag: String,
    /// ISO 3166-1 alpha-2 country code (e.g. "DE")
    pub country_code: String,
    pub lat: f64,
    pub lon: f64,
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.state.is_empty() {
            write!(f, "{} {}", self.flag, self.name)
        } else {
            write!(f, "{} {}, {}", self.flag, self.name, self.state)
        }
    }
}

/// Flag emoji for an ISO alpha-2 code, built from regional indicator symbols.
///
/// Anything that is not two ASCII letters gets the white flag.
pub fn flag_for_country(code: &str) -> String {
    let code = code.trim();
    if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return WHITE_FLAG.to_string();
    }
    code.to_ascii_uppercase()
        .chars()
        .filter_map(|c| char::from_u32(0x1F1E6 + (c as u32 - 'A' as u32)))
        .collect()
}

/// Format coordinates as "52.5244°N, 13.4105°E".
pub fn format_coords(lat: f64, lon: f64) -> String {
    let ns = if lat >= 0.0 { 'N' } else { 'S' };
    let ew = if lon >= 0.0 { 'E' } else { 'W' };
    format!("{:.4}\u{00B0}{}, {:.4}\u{00B0}{}", lat.abs(), ns, lon.abs(), ew)
}
