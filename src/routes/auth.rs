use axum::extract::State;
use axum::{Form, Json};
use garde::Validate;

use crate::app_state::AppState;
use crate::error::AppResult;
use crate::models::session::{SessionRequest, SessionResponse};
use crate::services::sessions;

/// POST /api/auth/session: issue an SDK session for a client.
pub async fn create_session(
    State(state): State<AppState>,
    Form(request): Form<SessionRequest>,
) -> AppResult<Json<SessionResponse>> {
    request.validate()?;
    let session = sessions::create_session(state.store.as_ref(), request.client_id).await?;

    Ok(Json(SessionResponse {
        session_token: session.session_token,
        expires_at: session.expires_at,
        client_id: session.client_id,
    }))
}
