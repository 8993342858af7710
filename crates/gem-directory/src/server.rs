/// Read-only HTTP API over the gem catalog.
///
/// - `GET /api/gems?category=`: list gems, optionally filtered by category chip
/// - `GET /api/gems/{id}`: one gem
/// - `GET /api/categories`: distinct category labels
/// - `GET /api/suggestions?q=&limit=`: type-ahead suggestions
/// - `GET /sitemap.xml`
/// - `GET /health`
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::debug;

use crate::catalog::Catalog;
use crate::config::{Config, MAX_SUGGESTION_LIMIT};
use crate::filter::filter_by_category;
use crate::model::{Gem, Suggestion};
use crate::search::suggest;
use crate::sitemap::{render_sitemap, DEFAULT_ROUTES};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(catalog: Catalog, config: Config) -> Self {
        Self {
            catalog: Arc::new(catalog),
            config: Arc::new(config),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/gems", get(list_gems))
        .route("/api/gems/{id}", get(get_gem))
        .route("/api/categories", get(list_categories))
        .route("/api/suggestions", get(suggestions))
        .route("/sitemap.xml", get(sitemap))
        .route("/health", get(health))
        .layer(cors)
        .with_state(state)
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

struct NotFound(String);

impl IntoResponse for NotFound {
    fn into_response(self) -> Response {
        (StatusCode::NOT_FOUND, Json(ErrorBody { error: self.0 })).into_response()
    }
}

#[derive(Debug, Deserialize)]
struct ListParams {
    #[serde(default)]
    category: String,
}

#[derive(Serialize)]
struct GemListResponse<'a> {
    gems: Vec<&'a Gem>,
}

async fn list_gems(State(state): State<AppState>, Query(params): Query<ListParams>) -> Response {
    let gems = filter_by_category(state.catalog.gems(), &params.category);
    debug!(category = %params.category, hits = gems.len(), "list gems");
    Json(GemListResponse { gems }).into_response()
}

async fn get_gem(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Gem>, NotFound> {
    state
        .catalog
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| NotFound(format!("no gem with id: {id}")))
}

#[derive(Serialize)]
struct CategoryListResponse {
    categories: Vec<String>,
}

async fn list_categories(State(state): State<AppState>) -> Json<CategoryListResponse> {
    Json(CategoryListResponse {
        categories: state.catalog.categories(),
    })
}

#[derive(Debug, Deserialize)]
struct SuggestionParams {
    #[serde(default)]
    q: String,
    limit: Option<usize>,
}

#[derive(Serialize)]
struct SuggestionResponse {
    results: Vec<Suggestion>,
}

async fn suggestions(
    State(state): State<AppState>,
    Query(params): Query<SuggestionParams>,
) -> Json<SuggestionResponse> {
    let limit = params
        .limit
        .unwrap_or(state.config.suggestion_limit)
        .clamp(1, MAX_SUGGESTION_LIMIT);
    let results = suggest(state.catalog.gems(), &params.q, limit);
    debug!(query = %params.q, limit, hits = results.len(), "suggestions");
    Json(SuggestionResponse { results })
}

async fn sitemap(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/xml")],
        render_sitemap(&state.config.site_url, DEFAULT_ROUTES),
    )
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    gems: usize,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        gems: state.catalog.len(),
    })
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;

    fn app() -> Router {
        router(AppState::new(Catalog::embedded().unwrap(), Config::default()))
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let resp = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn ids(list: &Value) -> Vec<String> {
        list.as_array()
            .unwrap()
            .iter()
            .map(|v| v["id"].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn lists_all_gems_without_category() {
        let (status, json) = get_json("/api/gems").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["gems"].as_array().unwrap().len(), Catalog::embedded().unwrap().len());
    }

    #[tokio::test]
    async fn filters_gems_by_category() {
        let (_, json) = get_json("/api/gems?category=cafe").await;
        assert_eq!(ids(&json["gems"]), vec!["open-door-cafe", "debs-cafe"]);
    }

    #[tokio::test]
    async fn gem_lookup_and_not_found() {
        let (status, json) = get_json("/api/gems/golden-bento").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["title"], "Golden Bento");
        assert_eq!(json["mapsUrl"], "https://maps.google.com/?q=Golden+Bento+Prince+George");

        let (status, json) = get_json("/api/gems/missing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "no gem with id: missing");
    }

    #[tokio::test]
    async fn suggestions_default_and_clamped_limits() {
        let (_, json) = get_json("/api/suggestions").await;
        let browse = ids(&json["results"]);
        assert_eq!(browse.len(), 5);
        assert_eq!(browse[0], "open-door-cafe");

        let (_, json) = get_json("/api/suggestions?q=&limit=0").await;
        assert_eq!(ids(&json["results"]), vec!["open-door-cafe"]);
    }

    #[tokio::test]
    async fn suggestions_rank_matches() {
        let (_, json) = get_json("/api/suggestions?q=breakfast&limit=8").await;
        let hits = ids(&json["results"]);
        // All three tag and describe breakfast, so catalog order decides.
        assert_eq!(hits, vec!["open-door-cafe", "debs-cafe", "queen-of-harts"]);
    }

    #[tokio::test]
    async fn serves_sitemap_xml() {
        let resp = app()
            .oneshot(Request::builder().uri("/sitemap.xml").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[header::CONTENT_TYPE], "application/xml");
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let xml = String::from_utf8(body.to_vec()).unwrap();
        assert!(xml.contains("<loc>https://hiddenprincegeorge.ca/gems</loc>"));
    }

    #[tokio::test]
    async fn lists_categories() {
        let (_, json) = get_json("/api/categories").await;
        let categories: Vec<&str> = json["categories"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(categories, vec!["Cafe", "Bakery", "Park", "Restaurant", "Food"]);
    }
}
