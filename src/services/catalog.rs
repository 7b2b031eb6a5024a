use crate::db::Store;
use crate::error::AppResult;
use crate::models::catalog::{CatalogImportRequest, CatalogProduct};

/// Maximum number of products returned by a catalog listing.
pub const LIST_LIMIT: i64 = 100;

/// Upsert every product in the batch, one record at a time.
///
/// Returns the number of input records processed. A store failure part way
/// through leaves earlier upserts in place.
pub async fn import_products(store: &dyn Store, request: CatalogImportRequest) -> AppResult<usize> {
    let CatalogImportRequest { tenant_id, products } = request;

    let mut imported = 0;
    for input in products {
        let product = CatalogProduct::new(&tenant_id, input);
        store.upsert_product(&product).await?;
        imported += 1;
    }

    tracing::info!(tenant_id = %tenant_id, imported, "Catalog imported");
    Ok(imported)
}

pub async fn list_products(store: &dyn Store, tenant_id: &str) -> AppResult<Vec<CatalogProduct>> {
    Ok(store.list_products(tenant_id, LIST_LIMIT).await?)
}
