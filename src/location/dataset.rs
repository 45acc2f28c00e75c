//! Place dataset parsing.
//!
//! The dataset is a JSON array of `{ name, country, state, population, lat, lng }`
//! objects. Coordinates and population may be numbers or numeric strings.
//! Records that cannot be used are dropped; only a non-array top level is an error.

use serde::Deserialize;
use tracing::debug;

use super::types::{flag_for_country, Place};
use crate::error::DataError;

/// Place dataset compiled into the binary.
pub const BUNDLED_PLACES: &str = include_str!("../../data/places.json");

#[derive(Deserialize)]
#[serde(untagged)]
enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    fn value(&self) -> Option<f64> {
        let v = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse().ok()?,
        };
        v.is_finite().then_some(v)
    }
}

#[derive(Deserialize)]
struct RawPlace {
    name: String,
    country: String,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    population: Option<Numeric>,
    lat: Numeric,
    #[serde(alias = "lon")]
    lng: Numeric,
}

/// A place before ordering, still carrying its population.
struct Ranked {
    place: Place,
    population: f64,
}

impl RawPlace {
    fn into_ranked(self) -> Option<Ranked> {
        let name = self.name.trim();
        let country = self.country.trim().to_ascii_uppercase();
        if name.is_empty() || country.is_empty() {
            return None;
        }
        let lat = self.lat.value()?;
        let lon = self.lng.value()?;
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return None;
        }
        let population = self.population.as_ref().and_then(Numeric::value).unwrap_or(0.0);

        Some(Ranked {
            place: Place {
                name: name.to_string(),
                state: self.state.unwrap_or_default(),
                flag: flag_for_country(&country),
                country_code: country,
                lat,
                lon,
            },
            population,
        })
    }
}

/// Parse a dataset, keep places in `allowed` countries, most populous first.
///
/// Ties keep their dataset order.
pub fn parse_places(json: &str, allowed: &[String]) -> Result<Vec<Place>, DataError> {
    let records: Vec<serde_json::Value> =
        serde_json::from_str(json).map_err(|source| DataError::Parse { what: "places", source })?;
    let total = records.len();

    let allowed: Vec<String> = allowed.iter().map(|c| c.trim().to_ascii_uppercase()).collect();

    let mut ranked: Vec<Ranked> = records
        .into_iter()
        .filter_map(|v| serde_json::from_value::<RawPlace>(v).ok())
        .filter_map(RawPlace::into_ranked)
        .filter(|r| allowed.contains(&r.place.country_code))
        .collect();

    ranked.sort_by(|a, b| b.population.total_cmp(&a.population));

    debug!(
        "places: kept {} of {} records for countries {:?}",
        ranked.len(),
        total,
        allowed
    );

    Ok(ranked.into_iter().map(|r| r.place).collect())
}
