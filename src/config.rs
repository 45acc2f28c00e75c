//! Configuration loaded from `<config dir>/peakly/config.json`.
//!
//! Every field has a default and a missing file means "all defaults".
//! `PEAKLY_HOST`, `PEAKLY_PORT`, `PEAKLY_PLACES` and `PEAKLY_LIMIT` override
//! the file.

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{info, warn};

use crate::error::{ConfigError, DataError};
use crate::languages::LanguageCatalog;
use crate::location::{PlaceIndex, DEFAULT_COUNTRIES, SEARCH_LIMIT};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub data: DataConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3030,
        }
    }
}

/// Optional dataset overrides; unset means the bundled data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub places: Option<PathBuf>,
    pub languages: Option<PathBuf>,
    pub countries: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// ISO alpha-2 codes of the countries whose places are loaded
    pub countries: Vec<String>,
    /// Maximum autocomplete results
    pub limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            countries: DEFAULT_COUNTRIES.iter().map(|c| c.to_string()).collect(),
            limit: SEARCH_LIMIT,
        }
    }
}

impl Config {
    /// Load from `path`, or the default location when `None`, then apply
    /// environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::default_path);
        let mut config = Self::read_file(&path)?;
        config.apply_env();
        Ok(config)
    }

    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("peakly")
            .join("config.json")
    }

    fn read_file(path: &Path) -> Result<Self, ConfigError> {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io { path: path.to_path_buf(), source });
            }
        };
        serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn apply_env(&mut self) {
        if let Some(host) = var("PEAKLY_HOST") {
            self.server.host = host;
        }
        if let Some(port) = parsed_var("PEAKLY_PORT") {
            self.server.port = port;
        }
        if let Some(places) = var("PEAKLY_PLACES") {
            self.data.places = Some(PathBuf::from(places));
        }
        if let Some(limit) = parsed_var("PEAKLY_LIMIT") {
            self.search.limit = limit;
        }
    }

    /// Build the place index this configuration describes.
    pub fn place_index(&self) -> Result<PlaceIndex, DataError> {
        let index = match &self.data.places {
            Some(path) => PlaceIndex::load(path, &self.search.countries)?,
            None => PlaceIndex::bundled(&self.search.countries)?,
        };
        if !(1..=SEARCH_LIMIT).contains(&self.search.limit) {
            warn!(
                "search.limit={} is outside 1..={}, clamping",
                self.search.limit, SEARCH_LIMIT
            );
        }
        Ok(index.with_limit(self.search.limit))
    }

    /// Build the language catalogue this configuration describes.
    ///
    /// Both table paths must be set to replace the bundled tables.
    pub fn language_catalog(&self) -> Result<LanguageCatalog, DataError> {
        match (&self.data.languages, &self.data.countries) {
            (Some(languages), Some(countries)) => LanguageCatalog::load(languages, countries),
            (None, None) => LanguageCatalog::bundled(),
            _ => {
                warn!("data.languages and data.countries must be set together; using bundled tables");
                LanguageCatalog::bundled()
            }
        }
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parsed_var<T: FromStr>(key: &str) -> Option<T>
where
    T::Err: Display,
{
    let raw = var(key)?;
    raw.trim()
        .parse()
        .map_err(|e| warn!("Ignoring invalid {key}={raw}: {e}"))
        .ok()
}
