use axum::extract::{Query, State};
use axum::Json;
use garde::Validate;

use crate::app_state::AppState;
use crate::error::AppResult;
use crate::models::catalog::{CatalogImportRequest, CatalogImportResponse, CatalogListResponse};
use crate::models::TenantQuery;
use crate::services::catalog;

/// POST /api/catalog/import
pub async fn import_catalog(
    State(state): State<AppState>,
    Json(request): Json<CatalogImportRequest>,
) -> AppResult<Json<CatalogImportResponse>> {
    request.validate()?;
    let tenant_id = request.tenant_id.clone();
    let imported_products = catalog::import_products(state.store.as_ref(), request).await?;

    Ok(Json(CatalogImportResponse {
        imported_products,
        tenant_id,
    }))
}

/// GET /api/catalog/products?tenant_id=
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<TenantQuery>,
) -> AppResult<Json<CatalogListResponse>> {
    let products = catalog::list_products(state.store.as_ref(), &query.tenant_id).await?;
    Ok(Json(CatalogListResponse { products }))
}
