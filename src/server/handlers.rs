use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::filters::{skills_by_user, Profile, ProfileFilter, UserSkill, INTENT_TAGS};
use crate::languages::LanguageEntry;
use crate::location::Place;
use crate::skills::Discipline;

use super::state::AppState;

// ─── Error response ──────────────────────────────────────────────

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    code: u16,
}

pub struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.1,
            code: self.0.as_u16(),
        };
        (self.0, Json(body)).into_response()
    }
}

fn api_error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    ApiError(status, msg.into())
}

/// A query parameter that must be present and non-blank. The value is passed
/// through untrimmed so lookups match the library's exact-name semantics.
fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str, ApiError> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(api_error(StatusCode::BAD_REQUEST, format!("Missing '{}' parameter", name))),
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

// ─── GET /api/places ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

pub async fn search_places(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Json<Vec<Place>> {
    let start = Instant::now();
    let query = params.q.unwrap_or_default();
    let hits: Vec<Place> = state.places.search_places(&query).into_iter().cloned().collect();

    info!("GET /api/places?q={} -> {} hits ({:.1}ms)", query, hits.len(), elapsed_ms(start));
    Json(hits)
}

// ─── GET /api/places/known ───────────────────────────────────────

#[derive(Deserialize)]
pub struct KnownQuery {
    pub name: Option<String>,
}

#[derive(Serialize)]
pub struct KnownResponse {
    pub name: String,
    pub known: bool,
}

pub async fn known_place(
    State(state): State<Arc<AppState>>,
    Query(params): Query<KnownQuery>,
) -> Result<Json<KnownResponse>, ApiError> {
    let name = required(&params.name, "name")?;
    let known = state.places.is_known_place(name);

    info!("GET /api/places/known?name={} -> {}", name, known);
    Ok(Json(KnownResponse { name: name.to_string(), known }))
}

// ─── GET /api/distance ───────────────────────────────────────────

#[derive(Deserialize)]
pub struct DistanceQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Serialize)]
pub struct DistanceResponse {
    pub from: String,
    pub to: String,
    /// `null` when either place is unknown
    pub distance_km: Option<f64>,
    pub unbounded: bool,
}

pub async fn distance(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DistanceQuery>,
) -> Result<Json<DistanceResponse>, ApiError> {
    let from = required(&params.from, "from")?;
    let to = required(&params.to, "to")?;

    let d = state.places.distance_km(from, to);
    let unbounded = crate::location::is_unbounded(d);

    info!("GET /api/distance?from={}&to={} -> {:.1} km", from, to, d);
    Ok(Json(DistanceResponse {
        from: from.to_string(),
        to: to.to_string(),
        distance_km: if unbounded { None } else { Some(d) },
        unbounded,
    }))
}

// ─── GET /api/languages ──────────────────────────────────────────

pub async fn languages(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Json<Vec<LanguageEntry>> {
    let query = params.q.unwrap_or_default();
    let hits: Vec<LanguageEntry> = state.languages.search(&query).into_iter().cloned().collect();

    info!("GET /api/languages?q={} -> {} hits", query, hits.len());
    Json(hits)
}

// ─── GET /api/skills, /api/intent-tags ───────────────────────────

#[derive(Serialize)]
pub struct SkillInfo {
    pub discipline: Discipline,
    pub german: &'static str,
    pub levels: &'static [&'static str],
}

pub async fn skills() -> Json<Vec<SkillInfo>> {
    Json(
        Discipline::ALL
            .into_iter()
            .map(|d| SkillInfo {
                discipline: d,
                german: d.german_name(),
                levels: d.levels(),
            })
            .collect(),
    )
}

pub async fn intent_tags() -> Json<&'static [&'static str]> {
    Json(INTENT_TAGS)
}

// ─── POST /api/profiles/filter ───────────────────────────────────

#[derive(Deserialize)]
pub struct FilterRequest {
    #[serde(default)]
    pub filter: ProfileFilter,
    pub profiles: Vec<Profile>,
    #[serde(default)]
    pub skills: Vec<UserSkill>,
}

pub async fn filter_profiles(
    State(state): State<Arc<AppState>>,
    Json(req): Json<FilterRequest>,
) -> Json<Vec<Profile>> {
    let start = Instant::now();
    let skills = skills_by_user(req.skills);
    let kept: Vec<Profile> = req
        .filter
        .apply(&state.places, &req.profiles, &skills)
        .into_iter()
        .cloned()
        .collect();

    info!(
        "POST /api/profiles/filter -> {} of {} profiles ({:.1}ms)",
        kept.len(),
        req.profiles.len(),
        elapsed_ms(start)
    );
    Json(kept)
}
