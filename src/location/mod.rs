//! Place subsystem for Peakly.
//!
//! Loads the bundled city dataset (restricted to an allow-list of countries,
//! most populous first) and answers autocomplete, validation and radius
//! distance queries against it.

pub mod dataset;
pub mod geo;
pub mod index;
pub mod types;

pub use geo::{haversine_km, is_unbounded, EARTH_RADIUS_KM};
pub use index::{PlaceIndex, SEARCH_LIMIT};
pub use types::{flag_for_country, format_coords, Place, DEFAULT_COUNTRIES, WHITE_FLAG};
