pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::curation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/curations", post(handlers::handle_create_curation))
        .route(
            "/api/v1/curations/export",
            post(handlers::handle_export_curation),
        )
        .with_state(state)
}
