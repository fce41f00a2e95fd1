use axum::extract::rejection::QueryRejection;
use axum::extract::{Extension, Path, Query};
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::rows::RowMap;
use crate::database::service;
use crate::handlers::params::{self, PageQuery};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::query::{self, ColumnSet, SchemaProvider, TableQueryResolver};

/// GET /api/v1/datas/table/:config_id - Page through the table a config points at
pub async fn by_config(
    Path(config_id): Path<Uuid>,
    query: Result<Query<PageQuery>, QueryRejection>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Vec<RowMap>> {
    let page = params::page_from(query)?;
    let main_pool = DatabaseManager::main_pool().await?;
    let config = service::require_config(&main_pool, config_id).await?;

    tracing::debug!(
        "{} querying config '{}' -> table '{}'",
        auth_user.email,
        config.name,
        config.table_name
    );

    // The stored name gets no special trust; it is re-validated like any other
    let data_pool = DatabaseManager::data_pool().await?;
    let result = query::query_table(&data_pool, &config.table_name, page).await?;

    Ok(ApiResponse::paged(result.data, result.count))
}

/// GET /api/v1/datas/tables - Tables visible in the data-center database
pub async fn list(Extension(auth_user): Extension<AuthUser>) -> ApiResult<Vec<String>> {
    let data_pool = DatabaseManager::data_pool().await?;
    let resolver = TableQueryResolver::for_pool(data_pool);
    let tables = resolver.provider().table_names().await?;

    tracing::debug!("{} listed {} tables", auth_user.email, tables.len());
    let count = tables.len() as i64;
    Ok(ApiResponse::paged(tables, count))
}

/// GET /api/v1/datas/tables/:table_name - Page through a table named directly
pub async fn by_name(
    Path(table_name): Path<String>,
    query: Result<Query<PageQuery>, QueryRejection>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Vec<RowMap>> {
    let page = params::page_from(query)?;
    tracing::debug!("{} querying table '{}'", auth_user.email, table_name);

    let data_pool = DatabaseManager::data_pool().await?;
    let result = query::query_table(&data_pool, &table_name, page).await?;

    Ok(ApiResponse::paged(result.data, result.count))
}

/// GET /api/v1/datas/tables/:table_name/columns - Reflected columns of a table
pub async fn columns(
    Path(table_name): Path<String>,
    Extension(_auth_user): Extension<AuthUser>,
) -> ApiResult<ColumnSet> {
    let data_pool = DatabaseManager::data_pool().await?;
    let plan = TableQueryResolver::for_pool(data_pool).plan(&table_name).await?;

    Ok(ApiResponse::success(plan.columns().clone()))
}
