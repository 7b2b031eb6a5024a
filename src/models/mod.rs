use serde::Deserialize;

pub mod catalog;
pub mod job;
pub mod session;
pub mod tenant;
pub mod tryon;
pub mod usage;

pub(crate) fn default_tenant() -> String {
    job::DEFAULT_TENANT.to_string()
}

/// `?tenant_id=` query, defaulting to the shared tenant.
#[derive(Debug, Deserialize)]
pub struct TenantQuery {
    #[serde(default = "default_tenant")]
    pub tenant_id: String,
}
