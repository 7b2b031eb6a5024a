use uuid::Uuid;

use crate::db::Store;
use crate::error::{AppError, AppResult};
use crate::models::job::{JobStatus, TryOnJob};
use crate::models::tryon::{JobView, ResultImageResponse, TryOnRequest};
use crate::services::codec::{self, DecodeError};
use crate::services::generation::{GeneratedImage, GenerationError, GenerationGateway};

/// Why a job ended up failed. Recorded as the job's `error_message`.
#[derive(Debug, thiserror::Error)]
pub enum JobFailure {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

/// Drives a try-on job from creation to its terminal state.
///
/// Built per request from the shared state; holds nothing between requests.
pub struct JobManager<'a> {
    store: &'a dyn Store,
    gateway: &'a GenerationGateway,
}

impl<'a> JobManager<'a> {
    pub fn new(store: &'a dyn Store, gateway: &'a GenerationGateway) -> Self {
        Self { store, gateway }
    }

    /// Create a job, run the generation and persist the outcome.
    ///
    /// Decode and generation failures produce a stored `failed` job and an
    /// `Ok` projection. Only store failures on the initial insert or the
    /// terminal update are returned as errors.
    pub async fn create_job(&self, request: TryOnRequest) -> AppResult<JobView> {
        let mut job = TryOnJob::new(request.tenant_id, request.product_id, request.variant_id);
        self.store.insert_job(&job).await?;

        metrics::counter!("tryon_jobs_total").increment(1);
        tracing::info!(
            job_id = %job.id,
            tenant_id = %job.tenant_id,
            product_id = ?job.product_id,
            profile = %request.options.profile,
            max_res = request.options.max_res,
            watermark = request.options.watermark,
            "Processing try-on job"
        );

        match self.generate(&request.person_image, &request.clothing_image).await {
            Ok(generated) => {
                job.mark_completed(codec::encode(&generated.bytes), generated.elapsed_ms);
                metrics::counter!("tryon_jobs_completed").increment(1);
                tracing::info!(
                    job_id = %job.id,
                    latency_ms = generated.elapsed_ms,
                    "Try-on job completed"
                );
            }
            Err(failure) => {
                job.mark_failed(failure.to_string());
                metrics::counter!("tryon_jobs_failed").increment(1);
                tracing::warn!(job_id = %job.id, error = %failure, "Try-on job failed");
            }
        }

        if !self.store.finish_job(&job).await? {
            tracing::debug!(job_id = %job.id, "Terminal update matched no stored job");
        }

        Ok(JobView::from(&job))
    }

    async fn generate(&self, person: &str, clothing: &str) -> Result<GeneratedImage, JobFailure> {
        let person = codec::decode(person)?;
        let clothing = codec::decode(clothing)?;
        Ok(self.gateway.generate(&person, &clothing).await?)
    }

    pub async fn get_job(&self, job_id: &str) -> AppResult<JobView> {
        let job = self.load(job_id).await?;
        Ok(JobView::from(&job))
    }

    /// The completed result as a PNG data URI.
    pub async fn result_data_uri(&self, job_id: &str) -> AppResult<ResultImageResponse> {
        let job = self.load(job_id).await?;

        match (&job.result_base64, job.status) {
            (Some(encoded), JobStatus::Completed) => Ok(ResultImageResponse {
                image_data: codec::png_data_uri(encoded),
                job_id: job.id,
                status: job.status,
            }),
            _ => Err(AppError::ResultUnavailable {
                job_id: job_id.to_string(),
            }),
        }
    }

    /// Ids that are not UUIDs cannot exist, so they are reported as missing.
    async fn load(&self, job_id: &str) -> AppResult<TryOnJob> {
        let not_found = || AppError::NotFound {
            entity: "Job",
            id: job_id.to_string(),
        };

        let id = Uuid::parse_str(job_id).map_err(|_| not_found())?;
        self.store.get_job(id).await?.ok_or_else(not_found)
    }
}
