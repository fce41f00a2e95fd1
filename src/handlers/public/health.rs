use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::database::manager::DatabaseManager;
use crate::routes::API_PREFIX;

/// GET / - Service banner
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Datas API",
            "version": version,
            "description": "Browse data-center tables through saved query configs",
            "endpoints": {
                "health": "/health (public)",
                "utils": format!("{}/utils/health (public)", API_PREFIX),
                "configs": format!("{}/datas/configs (public)", API_PREFIX),
                "datas": format!("{}/datas/* (protected)", API_PREFIX),
            }
        }
    }))
}

/// GET /health - Liveness including main database connectivity
pub async fn health() -> impl IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}

/// GET /api/v1/utils/health - Process liveness only
pub async fn utils_health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}
