use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::app_state::AppState;

pub mod analytics;
pub mod auth;
pub mod catalog;
pub mod health;
pub mod metrics;
pub mod tenants;
pub mod tryon;

/// Application router: `/health` plus the API nested under `/api`.
pub fn router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api_routes())
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/auth/session", post(auth::create_session))
        .route("/tryon/jobs", post(tryon::create_job))
        .route("/tryon/jobs/{job_id}", get(tryon::get_job))
        .route("/tryon/{job_id}/base64", get(tryon::get_result_base64))
        .route("/catalog/import", post(catalog::import_catalog))
        .route("/catalog/products", get(catalog::list_products))
        .route("/tenants", post(tenants::upsert_tenant))
        .route("/tenants/{client_id}", get(tenants::get_tenant))
        .route("/analytics/usage", get(analytics::usage))
}

/// GET /api: service banner.
async fn root() -> Json<Value> {
    Json(json!({
        "message": "TryOn.fit Virtual Try-On Platform API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
