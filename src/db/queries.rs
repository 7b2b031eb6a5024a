use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::models::job::{JobMetrics, JobStatus, TryOnJob};
use crate::models::usage::JobCounts;

/// Insert a new try-on job
pub async fn insert_job(pool: &PgPool, job: &TryOnJob) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO tryon_jobs (id, tenant_id, product_id, variant_id, status, result_base64,
                                latency_ms, error_message, metrics, created_at, completed_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        "#,
    )
    .bind(job.id)
    .bind(&job.tenant_id)
    .bind(&job.product_id)
    .bind(&job.variant_id)
    .bind(job.status.as_ref())
    .bind(&job.result_base64)
    .bind(job.latency_ms)
    .bind(&job.error_message)
    .bind(job.metrics.map(Json))
    .bind(job.created_at)
    .bind(job.completed_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Write the terminal state of a job. Returns whether a row matched.
pub async fn finish_job(pool: &PgPool, job: &TryOnJob) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE tryon_jobs
        SET status = $1,
            result_base64 = $2,
            latency_ms = $3,
            error_message = $4,
            metrics = $5,
            completed_at = $6
        WHERE id = $7
        "#,
    )
    .bind(job.status.as_ref())
    .bind(&job.result_base64)
    .bind(job.latency_ms)
    .bind(&job.error_message)
    .bind(job.metrics.map(Json))
    .bind(job.completed_at)
    .bind(job.id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Get a job by ID
pub async fn get_job(pool: &PgPool, job_id: Uuid) -> Result<Option<TryOnJob>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, tenant_id, product_id, variant_id, status, result_base64, latency_ms,
               error_message, metrics, created_at, completed_at
        FROM tryon_jobs
        WHERE id = $1
        "#,
    )
    .bind(job_id)
    .fetch_optional(pool)
    .await?;

    row.map(|r| job_from_row(&r)).transpose()
}

fn job_from_row(row: &PgRow) -> Result<TryOnJob, sqlx::Error> {
    let status: String = row.try_get("status")?;
    let status: JobStatus = status
        .parse()
        .map_err(|e: strum::ParseError| sqlx::Error::Decode(Box::new(e)))?;
    let metrics: Option<Json<JobMetrics>> = row.try_get("metrics")?;

    Ok(TryOnJob {
        id: row.try_get("id")?,
        tenant_id: row.try_get("tenant_id")?,
        product_id: row.try_get("product_id")?,
        variant_id: row.try_get("variant_id")?,
        status,
        result_base64: row.try_get("result_base64")?,
        latency_ms: row.try_get("latency_ms")?,
        error_message: row.try_get("error_message")?,
        metrics: metrics.map(|Json(m)| m),
        created_at: row.try_get("created_at")?,
        completed_at: row.try_get("completed_at")?,
    })
}

/// Job totals and mean completed latency for a tenant
pub async fn job_counts(pool: &PgPool, tenant_id: &str) -> Result<JobCounts, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT COUNT(*) AS total,
               COUNT(*) FILTER (WHERE status = 'completed') AS completed,
               (AVG(latency_ms) FILTER (WHERE status = 'completed'))::DOUBLE PRECISION
                   AS average_latency_ms
        FROM tryon_jobs
        WHERE tenant_id = $1
        "#,
    )
    .bind(tenant_id)
    .fetch_one(pool)
    .await?;

    Ok(JobCounts {
        total: row.try_get("total")?,
        completed: row.try_get("completed")?,
        average_latency_ms: row.try_get("average_latency_ms")?,
    })
}
