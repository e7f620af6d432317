pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/analysis/quality",
            post(handlers::handle_quality_analysis),
        )
        .route(
            "/api/v1/analysis/safety",
            post(handlers::handle_safety_analysis),
        )
        .with_state(state)
}
