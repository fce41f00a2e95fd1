use axum::extract::{Extension, Path};
use serde::Serialize;
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::rows::RowMap;
use crate::database::service;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::query::TableQueryResolver;
use crate::services::{flatten_content, GhostClient};

#[derive(Debug, Serialize)]
pub struct Message {
    pub message: String,
}

/// GET /api/v1/datas/:config_id/detail/:detail_id - One full row of the config's table
pub async fn get(
    Path((config_id, detail_id)): Path<(Uuid, i64)>,
    Extension(_auth_user): Extension<AuthUser>,
) -> ApiResult<RowMap> {
    let main_pool = DatabaseManager::main_pool().await?;
    let config = service::require_config(&main_pool, config_id).await?;

    let data_pool = DatabaseManager::data_pool().await?;
    let plan = TableQueryResolver::for_pool(data_pool.clone())
        .plan(&config.table_name)
        .await?;

    let mut row = plan.fetch_by_id(&data_pool, detail_id).await?.ok_or_else(|| {
        ApiError::not_found(format!("Record {} not found in table '{}'", detail_id, plan.table()))
    })?;
    flatten_content(&mut row);

    Ok(ApiResponse::success(row))
}

/// POST /api/v1/datas/:config_id/detail/:detail_id/send_ghost - Hand a record to the Ghost publisher
pub async fn send_ghost(
    Path((config_id, detail_id)): Path<(Uuid, i64)>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Message> {
    let main_pool = DatabaseManager::main_pool().await?;
    let config = service::require_config(&main_pool, config_id).await?;

    tracing::info!(
        "{} sending {} #{} to Ghost",
        auth_user.email,
        config.table_name,
        detail_id
    );

    let outcome = GhostClient::from_config()
        .publish(&config.table_name, detail_id)
        .await?;

    Ok(ApiResponse::success(Message {
        message: outcome.message(&config.table_name, detail_id),
    }))
}
