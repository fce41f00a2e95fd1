use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{DataQuery, DataQueryConfig};
use crate::query::Page;

/// Enabled query configs, newest first, plus the total number enabled
pub async fn list_enabled_configs(
    pool: &PgPool,
    page: Page,
) -> Result<(Vec<DataQueryConfig>, i64), DatabaseError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM data_query_config WHERE enabled")
        .fetch_one(pool)
        .await?;

    let configs = sqlx::query_as::<_, DataQueryConfig>(
        "SELECT id, name, db_name, table_name, db_uri, enabled, created_at, updated_at
         FROM data_query_config
         WHERE enabled
         ORDER BY created_at DESC
         OFFSET $1 LIMIT $2",
    )
    .bind(i64::from(page.offset))
    .bind(i64::from(page.limit))
    .fetch_all(pool)
    .await?;

    Ok((configs, count))
}

/// Look up a query config by id, enabled or not
pub async fn find_config(pool: &PgPool, config_id: Uuid) -> Result<Option<DataQueryConfig>, DatabaseError> {
    let config = sqlx::query_as::<_, DataQueryConfig>(
        "SELECT id, name, db_name, table_name, db_uri, enabled, created_at, updated_at
         FROM data_query_config
         WHERE id = $1",
    )
    .bind(config_id)
    .fetch_optional(pool)
    .await?;

    Ok(config)
}

/// Like `find_config`, but a missing config is an error
pub async fn require_config(pool: &PgPool, config_id: Uuid) -> Result<DataQueryConfig, DatabaseError> {
    find_config(pool, config_id)
        .await?
        .ok_or_else(|| DatabaseError::NotFound(format!("Query config '{}' not found", config_id)))
}

/// Saved queries for a config, newest first, plus their total
pub async fn list_saved_queries(
    pool: &PgPool,
    config_id: Uuid,
    page: Page,
) -> Result<(Vec<DataQuery>, i64), DatabaseError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM data_query WHERE config_id = $1")
        .bind(config_id)
        .fetch_one(pool)
        .await?;

    let queries = sqlx::query_as::<_, DataQuery>(
        "SELECT id, name, sql, config_id, enabled, created_at, updated_at
         FROM data_query
         WHERE config_id = $1
         ORDER BY created_at DESC
         OFFSET $2 LIMIT $3",
    )
    .bind(config_id)
    .bind(i64::from(page.offset))
    .bind(i64::from(page.limit))
    .fetch_all(pool)
    .await?;

    Ok((queries, count))
}

pub async fn require_saved_query(pool: &PgPool, query_id: Uuid) -> Result<DataQuery, DatabaseError> {
    sqlx::query_as::<_, DataQuery>(
        "SELECT id, name, sql, config_id, enabled, created_at, updated_at
         FROM data_query
         WHERE id = $1",
    )
    .bind(query_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound(format!("Saved query '{}' not found", query_id)))
}
