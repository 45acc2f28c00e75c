mod handlers;
mod state;

use axum::routing::{get, post};
use axum::Router;
use std::io;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::languages::LanguageCatalog;
use crate::location::PlaceIndex;
pub use state::AppState;

pub fn build_router(places: PlaceIndex, languages: LanguageCatalog) -> Router {
    let state = Arc::new(AppState { places, languages });

    Router::new()
        .route("/api/places", get(handlers::search_places))
        .route("/api/places/known", get(handlers::known_place))
        .route("/api/distance", get(handlers::distance))
        .route("/api/languages", get(handlers::languages))
        .route("/api/skills", get(handlers::skills))
        .route("/api/intent-tags", get(handlers::intent_tags))
        .route("/api/profiles/filter", post(handlers::filter_profiles))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start(host: &str, port: u16, places: PlaceIndex, languages: LanguageCatalog) -> io::Result<()> {
    let app = build_router(places, languages);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Peakly server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C, shutting down"),
        Err(e) => {
            warn!("Cannot listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn router() -> Router {
        let allowed: Vec<String> = crate::location::DEFAULT_COUNTRIES.iter().map(|c| c.to_string()).collect();
        build_router(
            PlaceIndex::bundled(&allowed).unwrap(),
            LanguageCatalog::bundled().unwrap(),
        )
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let resp = router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_search_places() {
        let (status, body) = get_json("/api/places?q=inns").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["name"], "Innsbruck");
        assert_eq!(body[0]["flag"], "🇦🇹");

        let (_, body) = get_json("/api/places").await;
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_known_place() {
        let (status, body) = get_json("/api/places/known?name=Z%C3%BCrich").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["known"], true);

        let (_, body) = get_json("/api/places/known?name=Paris").await;
        assert_eq!(body["known"], false);

        let (status, body) = get_json("/api/places/known").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 400);

        let (status, _) = get_json("/api/places/known?name=%20%20").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_known_place_matches_library_exactly() {
        let (_, body) = get_json("/api/places/known?name=%20Bern").await;
        assert_eq!(body["name"], " Bern");
        assert_eq!(body["known"], false);

        let (_, body) = get_json("/api/distance?from=Bern&to=%20Bern").await;
        assert_eq!(body["unbounded"], true);
    }

    #[tokio::test]
    async fn test_filter_accepts_german_discipline() {
        let payload = json!({
            "filter": { "skill": "Eisklettern" },
            "profiles": [
                { "id": "1", "username": "anna" },
                { "id": "2", "username": "ben" }
            ],
            "skills": [{ "user_id": "2", "skill": "Eisklettern", "experience_level": "WI3" }]
        });
        let resp = router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/profiles/filter")
                    .header("content-type", "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        let ids: Vec<&str> = body.as_array().unwrap().iter().map(|p| p["id"].as_str().unwrap()).collect();
        assert_eq!(ids, ["2"]);
    }

    #[tokio::test]
    async fn test_distance() {
        let (status, body) = get_json("/api/distance?from=Berlin&to=Munich").await;
        assert_eq!(status, StatusCode::OK);
        let km = body["distance_km"].as_f64().unwrap();
        assert!((km - 504.0).abs() < 5.0, "got {km}");
        assert_eq!(body["unbounded"], false);

        let (_, body) = get_json("/api/distance?from=Berlin&to=Paris").await;
        assert_eq!(body["distance_km"], Value::Null);
        assert_eq!(body["unbounded"], true);

        let (status, _) = get_json("/api/distance?from=Berlin").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_languages() {
        let (_, body) = get_json("/api/languages?q=deu").await;
        assert_eq!(body, json!([{ "code": "DE", "name": "German", "native": "Deutsch", "flag": "🇦🇹" }]));
    }

    #[tokio::test]
    async fn test_skills_and_tags() {
        let (_, body) = get_json("/api/skills").await;
        assert_eq!(body.as_array().unwrap().len(), 7);
        assert_eq!(body[0]["discipline"], "Mountaineering");
        assert_eq!(body[0]["german"], "Bergsteigen");

        let (_, body) = get_json("/api/intent-tags").await;
        assert_eq!(body.as_array().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_filter_profiles() {
        let payload = json!({
            "filter": { "location": "Innsbruck", "radius_km": 50, "skill": "Ice climbing" },
            "profiles": [
                { "id": "1", "username": "anna", "location": "Innsbruck" },
                { "id": "2", "username": "ben", "location": "Hamburg" },
                { "id": "3", "username": "cara", "location": "innsbruck" }
            ],
            "skills": [
                { "user_id": "1", "skill": "Ice climbing", "experience_level": "WI4" },
                { "user_id": "2", "skill": "Ice climbing", "experience_level": "WI5" }
            ]
        });
        let resp = router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/profiles/filter")
                    .header("content-type", "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        let ids: Vec<&str> = body.as_array().unwrap().iter().map(|p| p["id"].as_str().unwrap()).collect();
        assert_eq!(ids, ["1"]);
    }
}
