//! Language catalogue built by joining a language table with a country table.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use super::collate::NameOrder;
use crate::error::{read_data_file, DataError};
use crate::location::{flag_for_country, WHITE_FLAG};

/// Language table compiled into the binary (`{ code: { name, native } }`).
pub const BUNDLED_LANGUAGES: &str = include_str!("../../data/languages.json");
/// Country table compiled into the binary (`{ CC: { name, languages, emoji } }`).
pub const BUNDLED_COUNTRIES: &str = include_str!("../../data/countries.json");

/// One selectable language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageEntry {
    /// Uppercased ISO 639-1 code
    pub code: String,
    /// English display name
    pub name: String,
    /// Name in the language itself
    pub native: String,
    pub flag: String,
}

#[derive(Deserialize)]
struct RawLanguage {
    name: String,
    native: String,
}

#[derive(Deserialize)]
struct RawCountry {
    #[serde(default)]
    languages: Vec<String>,
    #[serde(default)]
    emoji: Option<String>,
}

/// Case-insensitive containment of `query` in the native name, display name or code.
///
/// An empty query matches everything.
pub fn matches(entry: &LanguageEntry, query: &str) -> bool {
    matches_lower(entry, &query.to_lowercase())
}

fn matches_lower(entry: &LanguageEntry, q: &str) -> bool {
    entry.native.to_lowercase().contains(q)
        || entry.name.to_lowercase().contains(q)
        || entry.code.to_lowercase().contains(q)
}

/// All languages, sorted by native name.
#[derive(Debug, Clone)]
pub struct LanguageCatalog {
    entries: Vec<LanguageEntry>,
}

impl LanguageCatalog {
    /// Build from the tables compiled into the crate.
    pub fn bundled() -> Result<Self, DataError> {
        Self::from_json(BUNDLED_LANGUAGES, BUNDLED_COUNTRIES)
    }

    /// Build from table files on disk.
    pub fn load(languages: &Path, countries: &Path) -> Result<Self, DataError> {
        let lang_json = read_data_file("languages", languages)?;
        let country_json = read_data_file("countries", countries)?;
        let catalog = Self::from_json(&lang_json, &country_json)?;
        info!("Loaded {} languages from {}", catalog.len(), languages.display());
        Ok(catalog)
    }

    /// Join the two JSON tables.
    ///
    /// A language's flag is the emoji of the first country, in table order,
    /// whose primary language is that language.
    pub fn from_json(languages: &str, countries: &str) -> Result<Self, DataError> {
        let lang_table: serde_json::Map<String, serde_json::Value> = serde_json::from_str(languages)
            .map_err(|source| DataError::Parse { what: "languages", source })?;
        let country_table: serde_json::Map<String, serde_json::Value> = serde_json::from_str(countries)
            .map_err(|source| DataError::Parse { what: "countries", source })?;

        let countries: Vec<(String, RawCountry)> = country_table
            .into_iter()
            .filter_map(|(cc, v)| serde_json::from_value(v).ok().map(|c| (cc, c)))
            .collect();

        let total = lang_table.len();
        let mut entries: Vec<LanguageEntry> = Vec::with_capacity(total);
        for (code, value) in lang_table {
            let Ok(raw) = serde_json::from_value::<RawLanguage>(value) else {
                continue;
            };
            let code_upper = code.trim().to_uppercase();
            if code_upper.is_empty() || entries.iter().any(|e| e.code == code_upper) {
                continue;
            }
            entries.push(LanguageEntry {
                flag: primary_flag(&countries, &code),
                code: code_upper,
                name: raw.name,
                native: raw.native,
            });
        }

        let order = NameOrder::new();
        entries.sort_by(|a, b| order.compare(&a.native, &b.native));
        debug!("languages: kept {} of {} records", entries.len(), total);

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every language, sorted by native name.
    pub fn all_languages(&self) -> &[LanguageEntry] {
        &self.entries
    }

    /// Languages matching `query`, in catalogue order.
    pub fn search(&self, query: &str) -> Vec<&LanguageEntry> {
        let q = query.to_lowercase();
        self.entries.iter().filter(|e| matches_lower(e, &q)).collect()
    }

    /// Look a language up by code, ignoring case.
    pub fn get(&self, code: &str) -> Option<&LanguageEntry> {
        let code = code.trim().to_uppercase();
        self.entries.iter().find(|e| e.code == code)
    }
}

fn primary_flag(countries: &[(String, RawCountry)], code: &str) -> String {
    countries
        .iter()
        .find(|(_, c)| c.languages.first().is_some_and(|l| l.eq_ignore_ascii_case(code.trim())))
        .map(|(cc, c)| c.emoji.clone().unwrap_or_else(|| flag_for_country(cc)))
        .unwrap_or_else(|| WHITE_FLAG.to_string())
}
