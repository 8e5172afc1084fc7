pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::document::handlers;
use crate::errors::AppError;
use crate::state::AppState;

async fn not_found() -> AppError {
    AppError::NotFound("No such route".to_string())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Document API
        .route("/api/v1/documents/types", get(handlers::handle_list_types))
        .route("/api/v1/documents/render", post(handlers::handle_render))
        .route(
            "/api/v1/documents/bundle",
            post(handlers::handle_render_bundle),
        )
        // Installment API
        .route("/api/v1/installments/quote", post(handlers::handle_quote))
        .fallback(not_found)
        .with_state(state)
}
