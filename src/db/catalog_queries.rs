use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Row};

use crate::models::catalog::{CatalogProduct, Variant};
use crate::models::session::SdkSession;
use crate::models::tenant::{TenantConfig, TenantFlags};

// ============================================================================
// Product catalog
// ============================================================================

/// Insert or replace a product by (tenant_id, product_id)
pub async fn upsert_product(pool: &PgPool, product: &CatalogProduct) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO product_catalog (id, tenant_id, product_id, title, variants, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (tenant_id, product_id) DO UPDATE
        SET title = EXCLUDED.title,
            variants = EXCLUDED.variants,
            updated_at = EXCLUDED.updated_at
        "#,
    )
    .bind(product.id)
    .bind(&product.tenant_id)
    .bind(&product.product_id)
    .bind(&product.title)
    .bind(Json(&product.variants))
    .bind(product.created_at)
    .bind(product.updated_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// List a tenant's products, oldest first
pub async fn list_products(
    pool: &PgPool,
    tenant_id: &str,
    limit: i64,
) -> Result<Vec<CatalogProduct>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, tenant_id, product_id, title, variants, created_at, updated_at
        FROM product_catalog
        WHERE tenant_id = $1
        ORDER BY created_at ASC
        LIMIT $2
        "#,
    )
    .bind(tenant_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    rows.iter().map(product_from_row).collect()
}

fn product_from_row(row: &PgRow) -> Result<CatalogProduct, sqlx::Error> {
    let Json(variants): Json<Vec<Variant>> = row.try_get("variants")?;

    Ok(CatalogProduct {
        id: row.try_get("id")?,
        tenant_id: row.try_get("tenant_id")?,
        product_id: row.try_get("product_id")?,
        title: row.try_get("title")?,
        variants,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

// ============================================================================
// Tenant configuration
// ============================================================================

/// Insert or replace a tenant by client_id. Flags are replaced wholesale.
pub async fn upsert_tenant(pool: &PgPool, tenant: &TenantConfig) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO tenant_configs (id, client_id, plan_tier, flags, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (client_id) DO UPDATE
        SET plan_tier = EXCLUDED.plan_tier,
            flags = EXCLUDED.flags,
            updated_at = EXCLUDED.updated_at
        "#,
    )
    .bind(tenant.id)
    .bind(&tenant.client_id)
    .bind(&tenant.plan_tier)
    .bind(Json(&tenant.flags))
    .bind(tenant.created_at)
    .bind(tenant.updated_at)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn get_tenant(pool: &PgPool, client_id: &str) -> Result<Option<TenantConfig>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, client_id, plan_tier, flags, created_at, updated_at
        FROM tenant_configs
        WHERE client_id = $1
        "#,
    )
    .bind(client_id)
    .fetch_optional(pool)
    .await?;

    row.map(|r| -> Result<TenantConfig, sqlx::Error> {
        let Json(flags): Json<TenantFlags> = r.try_get("flags")?;
        Ok(TenantConfig {
            id: r.try_get("id")?,
            client_id: r.try_get("client_id")?,
            plan_tier: r.try_get("plan_tier")?,
            flags,
            created_at: r.try_get("created_at")?,
            updated_at: r.try_get("updated_at")?,
        })
    })
    .transpose()
}

// ============================================================================
// SDK sessions
// ============================================================================

pub async fn insert_session(pool: &PgPool, session: &SdkSession) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO sdk_sessions (id, client_id, session_token, expires_at, created_at)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(session.id)
    .bind(&session.client_id)
    .bind(&session.session_token)
    .bind(session.expires_at)
    .bind(session.created_at)
    .execute(pool)
    .await?;

    Ok(())
}
