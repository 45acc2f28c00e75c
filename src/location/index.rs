//! The immutable place index: search, validation and distance.

use std::path::Path;
use tracing::info;

use super::dataset::{parse_places, BUNDLED_PLACES};
use super::geo::haversine_km;
use super::types::Place;
use crate::error::{read_data_file, DataError};

/// Maximum number of results returned by [`PlaceIndex::search_places`].
pub const SEARCH_LIMIT: usize = 8;

/// Places loaded once at start-up, most populous first.
#[derive(Debug, Clone)]
pub struct PlaceIndex {
    places: Vec<Place>,
    limit: usize,
}

impl PlaceIndex {
    /// Build from the dataset compiled into the crate.
    pub fn bundled(allowed: &[String]) -> Result<Self, DataError> {
        Self::from_json(BUNDLED_PLACES, allowed)
    }

    /// Build from a JSON dataset string.
    pub fn from_json(json: &str, allowed: &[String]) -> Result<Self, DataError> {
        Ok(Self::from_places(parse_places(json, allowed)?))
    }

    /// Build from a dataset file on disk.
    pub fn load(path: &Path, allowed: &[String]) -> Result<Self, DataError> {
        let json = read_data_file("places", path)?;
        let index = Self::from_json(&json, allowed)?;
        info!("Loaded {} places from {}", index.len(), path.display());
        Ok(index)
    }

    /// Wrap an already ordered list of places.
    pub fn from_places(places: Vec<Place>) -> Self {
        Self { places, limit: SEARCH_LIMIT }
    }

    /// Lower the result cap for searches. The cap stays within `1..=SEARCH_LIMIT`.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.clamp(1, SEARCH_LIMIT);
        self
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// All places in population order.
    pub fn places(&self) -> &[Place] {
        &self.places
    }

    /// Case-insensitive substring search on the place name.
    ///
    /// An empty query returns nothing. Results keep population order and are
    /// capped at the search limit.
    pub fn search_places(&self, query: &str) -> Vec<&Place> {
        if query.is_empty() {
            return Vec::new();
        }
        let q = query.to_lowercase();
        self.places
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&q))
            .take(self.limit)
            .collect()
    }

    /// First place whose name equals `name`, ignoring case.
    pub fn find_place(&self, name: &str) -> Option<&Place> {
        let n = name.to_lowercase();
        self.places.iter().find(|p| p.name.to_lowercase() == n)
    }

    /// Whether `name` is a known place, ignoring case.
    pub fn is_known_place(&self, name: &str) -> bool {
        self.find_place(name).is_some()
    }

    /// Great-circle distance between two named places.
    ///
    /// Returns `f64::INFINITY` if either name is unknown.
    pub fn distance_km(&self, from: &str, to: &str) -> f64 {
        match (self.find_place(from), self.find_place(to)) {
            (Some(a), Some(b)) => haversine_km(a.lat, a.lon, b.lat, b.lon),
            _ => f64::INFINITY,
        }
    }
}
