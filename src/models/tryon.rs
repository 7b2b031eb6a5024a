use garde::Validate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::job::{JobMetrics, JobStatus, TryOnJob};

/// Request to create a try-on job.
#[derive(Debug, Deserialize, Validate)]
pub struct TryOnRequest {
    #[garde(length(min = 1, max = 200))]
    #[serde(default = "crate::models::default_tenant")]
    pub tenant_id: String,

    #[garde(length(min = 1, max = 200))]
    pub product_id: Option<String>,

    #[garde(length(min = 1, max = 200))]
    pub variant_id: Option<String>,

    /// Base64 person photo, optionally data-URI prefixed.
    #[garde(length(min = 1))]
    pub person_image: String,

    /// Base64 clothing photo, optionally data-URI prefixed.
    #[garde(length(min = 1))]
    pub clothing_image: String,

    #[garde(skip)]
    #[serde(default)]
    pub options: TryOnOptions,
}

/// Rendering options supplied with a job. Accepted and recorded, not enforced.
///
/// Recognized keys are `profile`, `maxRes` and `watermark`; anything else is
/// ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TryOnOptions {
    pub profile: String,
    #[serde(rename = "maxRes")]
    pub max_res: u32,
    pub watermark: bool,
}

impl Default for TryOnOptions {
    fn default() -> Self {
        Self {
            profile: "speed".to_string(),
            max_res: 1024,
            watermark: false,
        }
    }
}

/// Externally visible projection of a job.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobView {
    pub job_id: Uuid,
    pub status: JobStatus,
    pub result_base64: Option<String>,
    pub latency_ms: Option<i64>,
    pub error_message: Option<String>,
    pub metrics: Option<JobMetrics>,
}

impl From<&TryOnJob> for JobView {
    fn from(job: &TryOnJob) -> Self {
        Self {
            job_id: job.id,
            status: job.status,
            result_base64: job.result_base64.clone(),
            latency_ms: job.latency_ms,
            error_message: job.error_message.clone(),
            metrics: job.metrics,
        }
    }
}

/// Completed result wrapped as a data URI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultImageResponse {
    pub image_data: String,
    pub job_id: Uuid,
    pub status: JobStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let req: TryOnRequest = serde_json::from_value(serde_json::json!({
            "person_image": "aGk=",
            "clothing_image": "aGk="
        }))
        .unwrap();
        assert_eq!(req.tenant_id, "default_tenant");
        assert_eq!(req.options, TryOnOptions::default());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_options_ignore_unknown_keys() {
        let options: TryOnOptions = serde_json::from_value(serde_json::json!({
            "maxRes": 512,
            "sharpen": true
        }))
        .unwrap();
        assert_eq!(options.max_res, 512);
        assert_eq!(options.profile, "speed");
        assert!(!options.watermark);
    }

    #[test]
    fn test_empty_image_rejected() {
        let req: TryOnRequest = serde_json::from_value(serde_json::json!({
            "tenant_id": "t1",
            "person_image": "",
            "clothing_image": "aGk="
        }))
        .unwrap();
        assert!(req.validate().is_err());
    }
}
