use axum::extract::{Path, State};
use axum::Json;
use garde::Validate;

use crate::app_state::AppState;
use crate::error::AppResult;
use crate::models::tenant::{TenantConfig, TenantRequest, TenantResponse};
use crate::services::tenants;

/// POST /api/tenants: create or replace a tenant configuration.
pub async fn upsert_tenant(
    State(state): State<AppState>,
    Json(request): Json<TenantRequest>,
) -> AppResult<Json<TenantResponse>> {
    request.validate()?;
    let tenant = tenants::upsert_tenant(state.store.as_ref(), request).await?;

    Ok(Json(TenantResponse {
        client_id: tenant.client_id,
        status: "configured".to_string(),
    }))
}

/// GET /api/tenants/{client_id}
pub async fn get_tenant(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> AppResult<Json<TenantConfig>> {
    Ok(Json(tenants::get_tenant(state.store.as_ref(), &client_id).await?))
}
