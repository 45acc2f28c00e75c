//! Peakly: lookup utilities behind the climbing partner platform.
//!
//! Place autocomplete, validation and radius distances over a bundled city
//! dataset; a language catalogue for profile language selection; discipline
//! grade scales; and the partner search filter that combines them.

pub mod config;
pub mod error;
pub mod filters;
pub mod languages;
pub mod location;
pub mod server;
pub mod skills;

pub use error::{ConfigError, DataError};
pub use languages::{LanguageCatalog, LanguageEntry};
pub use location::{Place, PlaceIndex};
