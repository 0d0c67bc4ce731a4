//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Server-rendered pages live at `/` (tables overview) and `/claims` (fraud
//! dashboard). The same data is exposed as JSON under `/api`. Every handler
//! reads through the shared store client in `AppState`; nothing is written
//! back to the store.

pub mod api;
pub mod dashboard;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Full application router: pages, JSON API, and health check.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(dashboard::tables_page))
        .route("/claims", get(dashboard::claims_page))
        .route("/api/tables", get(api::list_tables))
        .route("/api/claims", get(api::list_claims))
        .route(
            "/api/claims/selection",
            get(api::current_selection).post(api::select_claim),
        )
        .route("/api/claims/{id}", get(api::get_claim))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
