use std::sync::Arc;

use tryon_fit::{
    app_state::AppState,
    config::AppConfig,
    db::{self, PgStore, Store},
    models::{catalog::CatalogImportRequest, job::JobStatus, tenant::TenantRequest, tryon::TryOnRequest},
    services::{
        analytics, catalog, codec,
        generation::{GenerationGateway, PlaceholderGenerator},
        sessions, tenants,
    },
};
use uuid::Uuid;

/// Integration test: full flow against PostgreSQL
///
/// Covers:
/// 1. Database connection and migrations
/// 2. Job creation, terminal update and retrieval
/// 3. Catalog upsert idempotence
/// 4. Tenant replace semantics
/// 5. Session insert
/// 6. Usage aggregation
///
/// Note: This requires a running PostgreSQL instance configured via
/// DATABASE_URL.
#[tokio::test]
#[ignore] // Run with: cargo test --test integration_test -- --ignored
async fn test_full_integration() {
    let config = AppConfig::from_env().expect("Failed to load config");
    let database_url = config.database_url.as_deref().expect("DATABASE_URL must be set");

    let db_pool = db::init_pool(database_url, config.database_name.as_deref())
        .await
        .expect("Failed to connect to database");

    db::run_migrations(&db_pool)
        .await
        .expect("Failed to run migrations");

    let store: Arc<dyn Store> = Arc::new(PgStore::new(db_pool.clone()));
    let state = AppState::new(
        store.clone(),
        GenerationGateway::new(PlaceholderGenerator::with_size(32, 48)),
    );

    let tenant_id = format!("it-{}", Uuid::new_v4());
    let image = codec::encode(b"fake image data for testing");

    // 1. Completed job round-trips through the database
    let completed = state
        .jobs()
        .create_job(TryOnRequest {
            tenant_id: tenant_id.clone(),
            product_id: Some("sku-1".to_string()),
            variant_id: None,
            person_image: image.clone(),
            clothing_image: image.clone(),
            options: Default::default(),
        })
        .await
        .expect("Failed to create job");
    assert_eq!(completed.status, JobStatus::Completed);

    let stored = store
        .get_job(completed.job_id)
        .await
        .expect("Failed to get job")
        .expect("Job not found");
    assert_eq!(stored.status, JobStatus::Completed);
    assert!(stored.completed_at.is_some());
    assert_eq!(stored.metrics, completed.metrics);

    let fetched = state
        .jobs()
        .get_job(&completed.job_id.to_string())
        .await
        .expect("Failed to fetch projection");
    assert_eq!(fetched, completed);

    // 2. Failed job is persisted too
    let failed = state
        .jobs()
        .create_job(TryOnRequest {
            tenant_id: tenant_id.clone(),
            product_id: None,
            variant_id: None,
            person_image: "not-base64!!".to_string(),
            clothing_image: image,
            options: Default::default(),
        })
        .await
        .expect("Failed to create job");
    assert_eq!(failed.status, JobStatus::Failed);

    // 3. Terminal update on a missing row is a no-op
    let mut ghost = stored.clone();
    ghost.id = Uuid::new_v4();
    assert!(!store.finish_job(&ghost).await.expect("Update failed"));

    // 4. Catalog import is idempotent per product
    for title in ["Shirt", "Shirt v2"] {
        let request: CatalogImportRequest = serde_json::from_value(serde_json::json!({
            "tenant_id": tenant_id,
            "products": [{ "productId": "sku-1", "title": title, "variants": [{ "size": "M" }] }]
        }))
        .unwrap();
        assert_eq!(catalog::import_products(store.as_ref(), request).await.unwrap(), 1);
    }
    let products = catalog::list_products(store.as_ref(), &tenant_id).await.unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].title, "Shirt v2");

    // 5. Tenant upsert replaces the flag set
    let client_id = format!("client-{}", Uuid::new_v4());
    for flags in [
        serde_json::json!({ "watermarks": true }),
        serde_json::json!({ "retention_days": 5 }),
    ] {
        let request: TenantRequest =
            serde_json::from_value(serde_json::json!({ "client_id": client_id, "flags": flags }))
                .unwrap();
        tenants::upsert_tenant(store.as_ref(), request).await.unwrap();
    }
    let tenant = tenants::get_tenant(store.as_ref(), &client_id).await.unwrap();
    assert!(!tenant.flags.watermarks);
    assert_eq!(tenant.flags.retention_days, 5);

    // 6. Sessions
    let session = sessions::create_session(store.as_ref(), client_id.clone())
        .await
        .expect("Failed to create session");
    assert_eq!(session.expires_at, sessions::end_of_day(session.created_at));

    // 7. Usage aggregation
    let usage = analytics::usage_report(store.as_ref(), &tenant_id).await.unwrap();
    assert_eq!(usage.total_jobs, 2);
    assert_eq!(usage.completed_jobs, 1);
    assert_eq!(usage.success_rate, 50.0);
    assert!(usage.average_latency_ms >= 0.0);

    println!("✓ Full integration test passed");
}
