use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

/// Install the global Prometheus recorder and describe the job metrics.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    metrics::describe_counter!("tryon_jobs_total", "Total try-on jobs submitted");
    metrics::describe_counter!("tryon_jobs_completed", "Try-on jobs that produced an image");
    metrics::describe_counter!("tryon_jobs_failed", "Try-on jobs recorded as failed");
    metrics::describe_histogram!(
        "tryon_generation_seconds",
        "Wall-clock time of a single image generation call"
    );

    Ok(handle)
}

/// GET /metrics: Prometheus text exposition format.
pub async fn prometheus_metrics(State(handle): State<Arc<PrometheusHandle>>) -> impl IntoResponse {
    handle.render()
}
