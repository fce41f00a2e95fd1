use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config;
use crate::handlers::{protected::datas, public};
use crate::middleware::jwt_auth_middleware;

/// Prefix for every versioned API route
pub const API_PREFIX: &str = "/api/v1";

pub fn app() -> Router {
    let router = Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        .nest(API_PREFIX, api_routes())
        .layer(cors_layer());

    if config::config().api.enable_request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

fn api_routes() -> Router {
    Router::new()
        .route("/utils/health", get(public::utils_health))
        .route("/datas/configs", get(public::configs_list))
        .merge(datas_routes())
}

fn datas_routes() -> Router {
    Router::new()
        .route("/datas/table/:config_id", get(datas::table_by_config))
        .route("/datas/tables", get(datas::tables_list))
        .route("/datas/tables/:table_name", get(datas::table_by_name))
        .route("/datas/tables/:table_name/columns", get(datas::table_columns))
        .route("/datas/sqls/:config_id", get(datas::sqls_list))
        .route("/datas/sql/:sql_id", get(datas::sql_run))
        .route("/datas/:config_id/detail/:detail_id", get(datas::detail_get))
        .route(
            "/datas/:config_id/detail/:detail_id/send_ghost",
            post(datas::detail_send_ghost),
        )
        .route_layer(middleware::from_fn(jwt_auth_middleware))
}

fn cors_layer() -> CorsLayer {
    let security = &config::config().security;
    if !security.enable_cors {
        return CorsLayer::new();
    }
    if crate::is_development!() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}
