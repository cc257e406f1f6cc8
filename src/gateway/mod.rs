//! HTTP gateway (Axum) serving the daily snapshot and the generation trigger.

pub mod auth;
pub mod error;
pub mod handler;
pub mod state;

#[cfg(test)]
mod handler_tests;

use axum::{
    Json, Router,
    http::{HeaderMap, StatusCode, header::HeaderValue},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use auth::GenerateGate;
pub use error::GatewayError;
pub use handler::{
    daily_word_handler, generate_daily_word_handler, guess_handler, top_words_handler,
};
pub use state::{GatewayState, SnapshotCache};

/// Response header carrying a short machine-readable status.
pub const SEMANTLE_STATUS_HEADER: &str = "x-semantle-status";
pub const SEMANTLE_STATUS_HEALTHY: &str = "healthy";

pub fn create_router(state: GatewayState) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/api/daily-word", get(daily_word_handler))
        .route("/api/top-words", get(top_words_handler))
        .route("/api/guess", post(guess_handler))
        .route("/api/generate-daily-word", get(generate_daily_word_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        SEMANTLE_STATUS_HEADER,
        HeaderValue::from_static(SEMANTLE_STATUS_HEALTHY),
    );

    (
        StatusCode::OK,
        headers,
        Json(HealthResponse { status: "ok" }),
    )
        .into_response()
}
