use axum::extract::{Query, State};
use axum::Json;

use crate::app_state::AppState;
use crate::error::AppResult;
use crate::models::usage::UsageReport;
use crate::models::TenantQuery;
use crate::services::analytics;

/// GET /api/analytics/usage?tenant_id=
pub async fn usage(
    State(state): State<AppState>,
    Query(query): Query<TenantQuery>,
) -> AppResult<Json<UsageReport>> {
    Ok(Json(
        analytics::usage_report(state.store.as_ref(), &query.tenant_id).await?,
    ))
}
