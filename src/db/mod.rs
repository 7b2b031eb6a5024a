use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::time::Duration;
use uuid::Uuid;

use crate::models::catalog::CatalogProduct;
use crate::models::job::TryOnJob;
use crate::models::session::SdkSession;
use crate::models::tenant::TenantConfig;
use crate::models::usage::JobCounts;

pub mod catalog_queries;
pub mod memory;
pub mod postgres;
pub mod queries;

pub use memory::InMemoryStore;
pub use postgres::PgStore;

/// Initialize PostgreSQL connection pool, optionally overriding the database name
pub async fn init_pool(database_url: &str, database_name: Option<&str>) -> Result<PgPool, sqlx::Error> {
    let mut options: PgConnectOptions = database_url.parse()?;
    if let Some(name) = database_name {
        options = options.database(name);
    }

    PgPoolOptions::new()
        .max_connections(20)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect_with(options)
        .await
}

/// Run database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| sqlx::Error::Migrate(Box::new(e)))
}

/// Durable storage for jobs, catalog entries, tenants and sessions.
///
/// Every operation is a single-record read or write; nothing here spans
/// records transactionally.
#[async_trait]
pub trait Store: Send + Sync {
    /// Connectivity check for the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;

    async fn insert_job(&self, job: &TryOnJob) -> Result<(), StoreError>;

    /// Write the terminal fields of a job. Returns `false` when no record
    /// matched the id, which callers treat as a no-op.
    async fn finish_job(&self, job: &TryOnJob) -> Result<bool, StoreError>;

    async fn get_job(&self, job_id: Uuid) -> Result<Option<TryOnJob>, StoreError>;

    async fn job_counts(&self, tenant_id: &str) -> Result<JobCounts, StoreError>;

    /// Insert or replace by (tenant_id, product_id). The original id and
    /// creation time survive a replace.
    async fn upsert_product(&self, product: &CatalogProduct) -> Result<(), StoreError>;

    async fn list_products(
        &self,
        tenant_id: &str,
        limit: i64,
    ) -> Result<Vec<CatalogProduct>, StoreError>;

    /// Insert or replace by client id.
    async fn upsert_tenant(&self, tenant: &TenantConfig) -> Result<(), StoreError>;

    async fn get_tenant(&self, client_id: &str) -> Result<Option<TenantConfig>, StoreError>;

    async fn insert_session(&self, session: &SdkSession) -> Result<(), StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
