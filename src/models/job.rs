use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use uuid::Uuid;

/// Tenant used when a request does not name one.
pub const DEFAULT_TENANT: &str = "default_tenant";

/// Fixed preprocessing share reported in [`JobMetrics`].
const PREPROCESSING_MS: i64 = 200;

/// Fixed postprocessing share reported in [`JobMetrics`].
const POSTPROCESSING_MS: i64 = 200;

/// Status of a try-on job.
///
/// `Pending` exists for completeness of the stored vocabulary; jobs are
/// constructed directly in `Processing`.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

/// Illustrative timing breakdown derived from the total latency.
///
/// Only `latency_ms` is measured; the pre/post shares are constants and
/// `inference_ms` is whatever remains, which can be negative for fast calls.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct JobMetrics {
    pub preprocessing_ms: i64,
    pub inference_ms: i64,
    pub postprocessing_ms: i64,
}

impl JobMetrics {
    pub fn from_latency(latency_ms: i64) -> Self {
        Self {
            preprocessing_ms: PREPROCESSING_MS,
            inference_ms: latency_ms - PREPROCESSING_MS - POSTPROCESSING_MS,
            postprocessing_ms: POSTPROCESSING_MS,
        }
    }
}

/// A virtual try-on job.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TryOnJob {
    pub id: Uuid,
    pub tenant_id: String,
    pub product_id: Option<String>,
    pub variant_id: Option<String>,
    pub status: JobStatus,
    pub result_base64: Option<String>,
    pub latency_ms: Option<i64>,
    pub error_message: Option<String>,
    pub metrics: Option<JobMetrics>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl TryOnJob {
    /// Allocate a job that is already processing.
    pub fn new(tenant_id: String, product_id: Option<String>, variant_id: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            product_id,
            variant_id,
            status: JobStatus::Processing,
            result_base64: None,
            latency_ms: None,
            error_message: None,
            metrics: None,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    pub fn mark_completed(&mut self, result_base64: String, latency_ms: i64) {
        self.status = JobStatus::Completed;
        self.result_base64 = Some(result_base64);
        self.latency_ms = Some(latency_ms);
        self.metrics = Some(JobMetrics::from_latency(latency_ms));
        self.error_message = None;
        self.completed_at = Some(Utc::now());
    }

    pub fn mark_failed(&mut self, error_message: String) {
        self.status = JobStatus::Failed;
        self.result_base64 = None;
        self.error_message = Some(error_message);
        self.completed_at = Some(Utc::now());
    }
}
