use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{catalog_queries, queries, Store, StoreError};
use crate::models::catalog::CatalogProduct;
use crate::models::job::TryOnJob;
use crate::models::session::SdkSession;
use crate::models::tenant::TenantConfig;
use crate::models::usage::JobCounts;

/// PostgreSQL-backed [`Store`].
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn insert_job(&self, job: &TryOnJob) -> Result<(), StoreError> {
        Ok(queries::insert_job(&self.pool, job).await?)
    }

    async fn finish_job(&self, job: &TryOnJob) -> Result<bool, StoreError> {
        Ok(queries::finish_job(&self.pool, job).await?)
    }

    async fn get_job(&self, job_id: Uuid) -> Result<Option<TryOnJob>, StoreError> {
        Ok(queries::get_job(&self.pool, job_id).await?)
    }

    async fn job_counts(&self, tenant_id: &str) -> Result<JobCounts, StoreError> {
        Ok(queries::job_counts(&self.pool, tenant_id).await?)
    }

    async fn upsert_product(&self, product: &CatalogProduct) -> Result<(), StoreError> {
        Ok(catalog_queries::upsert_product(&self.pool, product).await?)
    }

    async fn list_products(
        &self,
        tenant_id: &str,
        limit: i64,
    ) -> Result<Vec<CatalogProduct>, StoreError> {
        Ok(catalog_queries::list_products(&self.pool, tenant_id, limit).await?)
    }

    async fn upsert_tenant(&self, tenant: &TenantConfig) -> Result<(), StoreError> {
        Ok(catalog_queries::upsert_tenant(&self.pool, tenant).await?)
    }

    async fn get_tenant(&self, client_id: &str) -> Result<Option<TenantConfig>, StoreError> {
        Ok(catalog_queries::get_tenant(&self.pool, client_id).await?)
    }

    async fn insert_session(&self, session: &SdkSession) -> Result<(), StoreError> {
        Ok(catalog_queries::insert_session(&self.pool, session).await?)
    }
}
