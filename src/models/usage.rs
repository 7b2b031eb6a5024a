use serde::{Deserialize, Serialize};

/// Raw job counts for one tenant, as read from the store.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct JobCounts {
    pub total: i64,
    pub completed: i64,
    /// Mean latency over completed jobs; `None` when there are none.
    pub average_latency_ms: Option<f64>,
}

/// Body of `GET /analytics/usage`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UsageReport {
    pub tenant_id: String,
    pub total_jobs: i64,
    pub completed_jobs: i64,
    /// Percentage of jobs that completed, 0 when there are no jobs.
    pub success_rate: f64,
    pub average_latency_ms: f64,
}
