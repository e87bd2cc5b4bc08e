// src/server/handlers/recipes.rs
//! Recipe listing, search and load handlers

use crate::error::Error;
use crate::query::{self, PageRequest, RecipePage, SearchCriteria, SearchResults};
use crate::server::ServerState;
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

/// Shared server state type
pub type SharedState = Arc<ServerState>;

/// Query parameters for the listing endpoint
///
/// Kept as raw strings so non-numeric values fall back to defaults instead
/// of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ListParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(parse_number(&self.page), parse_number(&self.limit))
    }
}

fn parse_number(raw: &Option<String>) -> Option<i64> {
    raw.as_deref().and_then(|s| s.trim().parse().ok())
}

/// Query parameters for the search endpoint
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    /// Accepted for compatibility; no calories filter exists
    pub calories: Option<String>,
    pub title: Option<String>,
    pub cuisine: Option<String>,
    pub total_time: Option<String>,
    pub rating: Option<String>,
}

impl SearchParams {
    pub fn criteria(&self) -> SearchCriteria {
        SearchCriteria::from_raw(
            self.cuisine.as_deref(),
            self.title.as_deref(),
            self.rating.as_deref(),
            self.total_time.as_deref(),
        )
    }
}

/// Body of the load endpoint response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoadResponse {
    pub status: String,
    pub message: String,
}

/// Store failure surfaced as a 500 with a JSON body
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "status": "error",
            "message": self.0.to_string(),
        });
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// List recipes ordered by rating
///
/// GET /api/recipes?page=&limit=
pub async fn list_recipes(
    State(state): State<SharedState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<RecipePage>> {
    let request = params.page_request();
    info!(
        "GET /api/recipes - page: {}, limit: {}",
        request.page, request.limit
    );

    let page = tokio::task::spawn_blocking(move || {
        let conn = state.open_db()?;
        query::list_recipes(&conn, request)
    })
    .await
    .map_err(Error::from)?
    .inspect_err(|e| {
        error!(
            "Error retrieving recipes for page {} with limit {}: {}",
            request.page, request.limit, e
        )
    })?;

    info!(
        "Retrieved {} recipes out of {} total for page {} with limit {}",
        page.data.len(),
        page.total,
        page.page,
        page.limit
    );
    Ok(Json(page))
}

/// Search recipes
///
/// GET /api/recipes/search?calories=&title=&cuisine=&total_time=&rating=
pub async fn search_recipes(
    State(state): State<SharedState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<SearchResults>> {
    info!(
        "GET /api/recipes/search - calories: {:?}, title: {:?}, cuisine: {:?}, total_time: {:?}, rating: {:?}",
        params.calories, params.title, params.cuisine, params.total_time, params.rating
    );

    let criteria = params.criteria();
    let results = tokio::task::spawn_blocking(move || {
        let conn = state.open_db()?;
        query::search_recipes(&conn, &criteria)
    })
    .await
    .map_err(Error::from)?
    .inspect_err(|e| error!("Error during search: {}", e))?;

    info!("Search returned {} recipes", results.data.len());
    Ok(Json(results))
}

/// Trigger the loader synchronously
///
/// GET /api/recipes/load
///
/// Returns 200 when the load finished (including the no-op cases) and 500
/// with the failure message otherwise.
pub async fn load_recipes(State(state): State<SharedState>) -> Response {
    info!("GET /api/recipes/load - Triggering data load");

    match state.load().await {
        Ok(outcome) => {
            info!("Data load completed: {}", outcome.status.as_str());
            let body = LoadResponse {
                status: "ok".to_string(),
                message: "Data loaded successfully".to_string(),
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => {
            error!("Error during data load: {}", e);
            let body = LoadResponse {
                status: "error".to_string(),
                message: format!("Failed to load data: {}", e),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_params_lenient() {
        let params = ListParams {
            page: Some("abc".to_string()),
            limit: Some(" 25 ".to_string()),
        };
        assert_eq!(params.page_request(), PageRequest { page: 1, limit: 25 });

        let params = ListParams::default();
        assert_eq!(params.page_request(), PageRequest { page: 1, limit: 10 });
    }

    #[test]
    fn test_search_params_ignore_calories() {
        let params = SearchParams {
            calories: Some("<=500".to_string()),
            ..SearchParams::default()
        };
        assert!(params.criteria().predicates().is_empty());
    }
}
