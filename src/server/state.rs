use crate::languages::LanguageCatalog;
use crate::location::PlaceIndex;

/// Tables shared read-only by every request.
pub struct AppState {
    pub places: PlaceIndex,
    pub languages: LanguageCatalog,
}
