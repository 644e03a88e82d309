//! HTTP route handlers for Quizgen.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

mod docs;
mod health;
mod quiz;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Landing & Status
        .route("/", get(health::index))
        .route("/health", get(health::health_check))

        // API documentation
        .route("/api-docs", get(docs::swagger_ui))
        .route(docs::OPENAPI_PATH, get(docs::openapi_json))

        // Quiz generation
        .route("/api/generate-quiz", post(quiz::generate_quiz))

        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())

        // Add shared state
        .with_state(state)
}
