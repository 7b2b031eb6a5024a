use chrono::{DateTime, Utc};
use garde::Validate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A product variant. Opaque to this service.
pub type Variant = serde_json::Map<String, serde_json::Value>;

/// Catalog entry, unique per (tenant_id, product_id).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogProduct {
    pub id: Uuid,
    pub tenant_id: String,
    pub product_id: String,
    pub title: String,
    pub variants: Vec<Variant>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CatalogProduct {
    pub fn new(tenant_id: &str, input: ProductInput) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            tenant_id: tenant_id.to_string(),
            product_id: input.product_id,
            title: input.title,
            variants: input.variants,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Body of `POST /catalog/import`.
#[derive(Debug, Deserialize, Validate)]
pub struct CatalogImportRequest {
    #[garde(length(min = 1, max = 200))]
    #[serde(default = "crate::models::default_tenant")]
    pub tenant_id: String,

    #[garde(dive)]
    #[serde(default)]
    pub products: Vec<ProductInput>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProductInput {
    #[garde(length(min = 1, max = 200))]
    #[serde(rename = "productId")]
    pub product_id: String,

    #[garde(length(min = 1))]
    pub title: String,

    #[garde(skip)]
    #[serde(default)]
    pub variants: Vec<Variant>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogImportResponse {
    pub imported_products: usize,
    pub tenant_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogListResponse {
    pub products: Vec<CatalogProduct>,
}
