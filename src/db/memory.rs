use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::db::{Store, StoreError};
use crate::models::catalog::CatalogProduct;
use crate::models::job::{JobStatus, TryOnJob};
use crate::models::session::SdkSession;
use crate::models::tenant::TenantConfig;
use crate::models::usage::JobCounts;

/// In-memory [`Store`] for local development and tests.
///
/// Data lives for the lifetime of the process.
#[derive(Default)]
pub struct InMemoryStore {
    jobs: RwLock<HashMap<Uuid, TryOnJob>>,
    products: RwLock<HashMap<(String, String), CatalogProduct>>,
    tenants: RwLock<HashMap<String, TenantConfig>>,
    sessions: RwLock<HashMap<String, SdkSession>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn insert_job(&self, job: &TryOnJob) -> Result<(), StoreError> {
        self.jobs.write().await.insert(job.id, job.clone());
        Ok(())
    }

    async fn finish_job(&self, job: &TryOnJob) -> Result<bool, StoreError> {
        let mut jobs = self.jobs.write().await;
        match jobs.get_mut(&job.id) {
            Some(stored) => {
                stored.status = job.status;
                stored.result_base64 = job.result_base64.clone();
                stored.latency_ms = job.latency_ms;
                stored.error_message = job.error_message.clone();
                stored.metrics = job.metrics;
                stored.completed_at = job.completed_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn get_job(&self, job_id: Uuid) -> Result<Option<TryOnJob>, StoreError> {
        Ok(self.jobs.read().await.get(&job_id).cloned())
    }

    async fn job_counts(&self, tenant_id: &str) -> Result<JobCounts, StoreError> {
        let jobs = self.jobs.read().await;
        let tenant_jobs = jobs.values().filter(|job| job.tenant_id == tenant_id);

        let mut counts = JobCounts::default();
        let mut latencies = Vec::new();
        for job in tenant_jobs {
            counts.total += 1;
            if job.status == JobStatus::Completed {
                counts.completed += 1;
                latencies.extend(job.latency_ms);
            }
        }

        if !latencies.is_empty() {
            let sum: i64 = latencies.iter().sum();
            counts.average_latency_ms = Some(sum as f64 / latencies.len() as f64);
        }

        Ok(counts)
    }

    async fn upsert_product(&self, product: &CatalogProduct) -> Result<(), StoreError> {
        let key = (product.tenant_id.clone(), product.product_id.clone());
        let mut products = self.products.write().await;
        match products.get_mut(&key) {
            Some(stored) => {
                stored.title = product.title.clone();
                stored.variants = product.variants.clone();
                stored.updated_at = product.updated_at;
            }
            None => {
                products.insert(key, product.clone());
            }
        }
        Ok(())
    }

    async fn list_products(
        &self,
        tenant_id: &str,
        limit: i64,
    ) -> Result<Vec<CatalogProduct>, StoreError> {
        let products = self.products.read().await;
        let mut listed: Vec<CatalogProduct> = products
            .values()
            .filter(|product| product.tenant_id == tenant_id)
            .cloned()
            .collect();
        listed.sort_by_key(|product| product.created_at);
        listed.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(listed)
    }

    async fn upsert_tenant(&self, tenant: &TenantConfig) -> Result<(), StoreError> {
        let mut tenants = self.tenants.write().await;
        match tenants.get_mut(&tenant.client_id) {
            Some(stored) => {
                stored.plan_tier = tenant.plan_tier.clone();
                stored.flags = tenant.flags.clone();
                stored.updated_at = tenant.updated_at;
            }
            None => {
                tenants.insert(tenant.client_id.clone(), tenant.clone());
            }
        }
        Ok(())
    }

    async fn get_tenant(&self, client_id: &str) -> Result<Option<TenantConfig>, StoreError> {
        Ok(self.tenants.read().await.get(client_id).cloned())
    }

    async fn insert_session(&self, session: &SdkSession) -> Result<(), StoreError> {
        self.sessions
            .write()
            .await
            .insert(session.session_token.clone(), session.clone());
        Ok(())
    }
}
