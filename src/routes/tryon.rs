use axum::extract::{Path, State};
use axum::Json;
use garde::Validate;

use crate::app_state::AppState;
use crate::error::AppResult;
use crate::models::tryon::{JobView, ResultImageResponse, TryOnRequest};

/// POST /api/tryon/jobs: run a try-on job to completion.
///
/// Answers 200 with the job projection even when the job failed.
pub async fn create_job(
    State(state): State<AppState>,
    Json(request): Json<TryOnRequest>,
) -> AppResult<Json<JobView>> {
    request.validate()?;
    Ok(Json(state.jobs().create_job(request).await?))
}

/// GET /api/tryon/jobs/{job_id}
pub async fn get_job(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> AppResult<Json<JobView>> {
    Ok(Json(state.jobs().get_job(&job_id).await?))
}

/// GET /api/tryon/{job_id}/base64: completed result as a data URI.
pub async fn get_result_base64(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> AppResult<Json<ResultImageResponse>> {
    Ok(Json(state.jobs().result_data_uri(&job_id).await?))
}
