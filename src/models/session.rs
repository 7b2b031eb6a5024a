use chrono::{DateTime, Utc};
use garde::Validate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// SDK session issued to a vendor integration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SdkSession {
    pub id: Uuid,
    pub client_id: String,
    pub session_token: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Form body of `POST /auth/session`.
#[derive(Debug, Deserialize, Validate)]
pub struct SessionRequest {
    #[garde(length(min = 1, max = 200))]
    pub client_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub session_token: String,
    pub expires_at: DateTime<Utc>,
    pub client_id: String,
}
