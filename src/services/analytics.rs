use crate::db::Store;
use crate::error::AppResult;
use crate::models::usage::{JobCounts, UsageReport};

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Turn raw counts into the reported aggregate. Empty tenants report zeros.
///
/// Only the average latency is rounded; the success rate is passed through.
pub fn summarize(tenant_id: &str, counts: JobCounts) -> UsageReport {
    let success_rate = if counts.total > 0 {
        counts.completed as f64 / counts.total as f64 * 100.0
    } else {
        0.0
    };

    UsageReport {
        tenant_id: tenant_id.to_string(),
        total_jobs: counts.total,
        completed_jobs: counts.completed,
        success_rate,
        average_latency_ms: round2(counts.average_latency_ms.unwrap_or(0.0)),
    }
}

pub async fn usage_report(store: &dyn Store, tenant_id: &str) -> AppResult<UsageReport> {
    let counts = store.job_counts(tenant_id).await?;
    Ok(summarize(tenant_id, counts))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_jobs() {
        let report = summarize("t1", JobCounts::default());
        assert_eq!(report.total_jobs, 0);
        assert_eq!(report.success_rate, 0.0);
        assert_eq!(report.average_latency_ms, 0.0);
    }

    #[test]
    fn test_success_rate_is_raw_percentage() {
        let report = summarize(
            "t1",
            JobCounts {
                total: 3,
                completed: 2,
                average_latency_ms: Some(1234.5678),
            },
        );
        assert_eq!(report.success_rate, 2.0 / 3.0 * 100.0);
        assert_eq!(report.average_latency_ms, 1234.57);
    }

    #[test]
    fn test_only_failures() {
        let report = summarize(
            "t1",
            JobCounts {
                total: 4,
                completed: 0,
                average_latency_ms: None,
            },
        );
        assert_eq!(report.success_rate, 0.0);
        assert_eq!(report.average_latency_ms, 0.0);
    }
}
