use axum::extract::rejection::QueryRejection;
use axum::extract::{Extension, Path, Query};
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::models::DataQueryPublic;
use crate::database::rows::RowMap;
use crate::database::service;
use crate::handlers::params::{self, PageQuery};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::query::run_saved_query;

/// GET /api/v1/datas/sqls/:config_id - Saved queries attached to a config
pub async fn list_for_config(
    Path(config_id): Path<Uuid>,
    query: Result<Query<PageQuery>, QueryRejection>,
    Extension(_auth_user): Extension<AuthUser>,
) -> ApiResult<Vec<DataQueryPublic>> {
    let page = params::page_from(query)?;
    let pool = DatabaseManager::main_pool().await?;
    let (queries, count) = service::list_saved_queries(&pool, config_id, page).await?;

    let data = queries.into_iter().map(DataQueryPublic::from).collect();
    Ok(ApiResponse::paged(data, count))
}

/// GET /api/v1/datas/sql/:sql_id - Run a saved query against the data center
pub async fn run(
    Path(sql_id): Path<Uuid>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Vec<RowMap>> {
    let main_pool = DatabaseManager::main_pool().await?;
    let saved = service::require_saved_query(&main_pool, sql_id).await?;

    tracing::info!("{} running saved query '{}'", auth_user.email, saved.name);

    let data_pool = DatabaseManager::data_pool().await?;
    let result = run_saved_query(&data_pool, &saved).await?;

    Ok(ApiResponse::paged(result.data, result.count))
}
