use chrono::{DateTime, Utc};
use garde::Validate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-tenant feature flags.
///
/// Missing keys fall back to their defaults and unrecognized keys are dropped
/// during deserialization. An upsert replaces the whole set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TenantFlags {
    pub speed_profile: String,
    pub fidelity_profile: String,
    pub watermarks: bool,
    pub retention_days: u32,
}

impl Default for TenantFlags {
    fn default() -> Self {
        Self {
            speed_profile: "fast".to_string(),
            fidelity_profile: "medium".to_string(),
            watermarks: false,
            retention_days: 72,
        }
    }
}

/// Stored tenant configuration, one per client id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TenantConfig {
    pub id: Uuid,
    pub client_id: String,
    pub plan_tier: String,
    pub flags: TenantFlags,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_plan_tier() -> String {
    "basic".to_string()
}

/// Body of `POST /tenants`.
#[derive(Debug, Deserialize, Validate)]
pub struct TenantRequest {
    #[garde(length(min = 1, max = 200))]
    pub client_id: String,

    #[garde(length(min = 1, max = 50))]
    #[serde(default = "default_plan_tier")]
    pub plan_tier: String,

    #[garde(skip)]
    #[serde(default)]
    pub flags: TenantFlags,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TenantResponse {
    pub client_id: String,
    pub status: String,
}
