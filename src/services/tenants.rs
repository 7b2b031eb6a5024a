use chrono::Utc;
use uuid::Uuid;

use crate::db::Store;
use crate::error::{AppError, AppResult};
use crate::models::tenant::{TenantConfig, TenantRequest};

/// Create or replace the configuration for a client id.
pub async fn upsert_tenant(store: &dyn Store, request: TenantRequest) -> AppResult<TenantConfig> {
    let now = Utc::now();
    let tenant = TenantConfig {
        id: Uuid::new_v4(),
        client_id: request.client_id,
        plan_tier: request.plan_tier,
        flags: request.flags,
        created_at: now,
        updated_at: now,
    };

    store.upsert_tenant(&tenant).await?;
    tracing::info!(client_id = %tenant.client_id, plan_tier = %tenant.plan_tier, "Tenant configured");
    Ok(tenant)
}

pub async fn get_tenant(store: &dyn Store, client_id: &str) -> AppResult<TenantConfig> {
    store
        .get_tenant(client_id)
        .await?
        .ok_or_else(|| AppError::NotFound {
            entity: "Tenant",
            id: client_id.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryStore;
    use crate::models::tenant::TenantFlags;

    #[tokio::test]
    async fn test_upsert_replaces_flags() {
        let store = InMemoryStore::new();

        let first: TenantRequest = serde_json::from_value(serde_json::json!({
            "client_id": "acme",
            "plan_tier": "pro",
            "flags": { "watermarks": true, "retention_days": 30 }
        }))
        .unwrap();
        upsert_tenant(&store, first).await.unwrap();

        let second: TenantRequest = serde_json::from_value(serde_json::json!({
            "client_id": "acme",
            "flags": { "speed_profile": "quality" }
        }))
        .unwrap();
        upsert_tenant(&store, second).await.unwrap();

        let stored = get_tenant(&store, "acme").await.unwrap();
        assert_eq!(stored.plan_tier, "basic");
        assert_eq!(
            stored.flags,
            TenantFlags {
                speed_profile: "quality".to_string(),
                ..TenantFlags::default()
            }
        );
    }

    #[tokio::test]
    async fn test_unknown_tenant_not_found() {
        let store = InMemoryStore::new();
        assert!(matches!(
            get_tenant(&store, "nobody").await,
            Err(AppError::NotFound { entity: "Tenant", .. })
        ));
    }
}
