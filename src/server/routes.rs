// src/server/routes.rs
//! Axum router configuration for the recipe server

use crate::server::ServerState;
use crate::server::handlers::recipes;
use axum::{Router, routing::get};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};

/// Create the main application router
pub fn create_router(state: Arc<ServerState>) -> Router {
    // Read-only API, so CORS is fully open
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/api/recipes", get(recipes::list_recipes))
        .route("/api/recipes/search", get(recipes::search_recipes))
        .route("/api/recipes/load", get(recipes::load_recipes))
        .with_state(state);

    Router::new()
        .route("/health", get(health_check))
        .merge(api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(cors)
                .layer(CompressionLayer::new()),
        )
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::ServerConfig;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_check() {
        let state = Arc::new(ServerState::new(ServerConfig::default()));
        let app = create_router(state);

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let state = Arc::new(ServerState::new(ServerConfig::default()));
        let app = create_router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/recipes/unknown/path")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
