use axum::extract::rejection::QueryRejection;
use axum::extract::Query;

use crate::database::manager::DatabaseManager;
use crate::database::models::DataQueryConfigPublic;
use crate::database::service;
use crate::handlers::params::{self, PageQuery};
use crate::middleware::{ApiResponse, ApiResult};

/// GET /api/v1/datas/configs - Enabled query configs, newest first
pub async fn list(query: Result<Query<PageQuery>, QueryRejection>) -> ApiResult<Vec<DataQueryConfigPublic>> {
    let page = params::page_from(query)?;
    let pool = DatabaseManager::main_pool().await?;
    let (configs, count) = service::list_enabled_configs(&pool, page).await?;

    let data = configs.into_iter().map(DataQueryConfigPublic::from).collect();
    Ok(ApiResponse::paged(data, count))
}
