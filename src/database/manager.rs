use sqlx::{postgres::PgPoolOptions, PgPool};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;

use crate::config;

/// Errors from DatabaseManager
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL in {0}")]
    InvalidDatabaseUrl(&'static str),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Which database a pool talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatabaseRole {
    /// Application database holding query configs and saved queries
    Main,
    /// Data-center database whose tables are browsed dynamically
    DataCenter,
}

impl DatabaseRole {
    fn env_var(self) -> &'static str {
        match self {
            DatabaseRole::Main => "DATABASE_URL",
            DatabaseRole::DataCenter => "DATA_CENTER_URI",
        }
    }
}

/// Centralized connection pool manager for the main and data-center databases
pub struct DatabaseManager {
    pools: Arc<RwLock<HashMap<DatabaseRole, PgPool>>>,
}

impl DatabaseManager {
    fn instance() -> &'static DatabaseManager {
        use std::sync::OnceLock;
        static INSTANCE: OnceLock<DatabaseManager> = OnceLock::new();
        INSTANCE.get_or_init(|| DatabaseManager {
            pools: Arc::new(RwLock::new(HashMap::new())),
        })
    }

    /// Get main application database pool
    pub async fn main_pool() -> Result<PgPool, DatabaseError> {
        Self::instance().get_pool(DatabaseRole::Main).await
    }

    /// Get data-center database pool
    pub async fn data_pool() -> Result<PgPool, DatabaseError> {
        Self::instance().get_pool(DatabaseRole::DataCenter).await
    }

    /// Get existing pool or create a new one lazily
    async fn get_pool(&self, role: DatabaseRole) -> Result<PgPool, DatabaseError> {
        // Fast path: try read lock
        {
            let pools = self.pools.read().await;
            if let Some(pool) = pools.get(&role) {
                return Ok(pool.clone());
            }
        }

        let connection_string = Self::connection_string(role)?;
        let settings = &config::config().database;

        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(Duration::from_secs(settings.connection_timeout))
            .connect(&connection_string)
            .await?;

        // Another request may have raced us here; keep whichever pool landed first
        let pool = {
            let mut pools = self.pools.write().await;
            pools.entry(role).or_insert(pool).clone()
        };

        info!("Created database pool for: {:?}", role);
        Ok(pool)
    }

    fn connection_string(role: DatabaseRole) -> Result<String, DatabaseError> {
        let var = role.env_var();
        let raw = std::env::var(var).map_err(|_| DatabaseError::ConfigMissing(var))?;
        Self::validate_url(&raw, var)
    }

    fn validate_url(raw: &str, var: &'static str) -> Result<String, DatabaseError> {
        let url = url::Url::parse(raw).map_err(|_| DatabaseError::InvalidDatabaseUrl(var))?;
        match url.scheme() {
            "postgres" | "postgresql" => Ok(url.into()),
            _ => Err(DatabaseError::InvalidDatabaseUrl(var)),
        }
    }

    /// Pings the main pool to ensure connectivity
    pub async fn health_check() -> Result<(), DatabaseError> {
        let pool = Self::main_pool().await?;
        sqlx::query("SELECT 1").execute(&pool).await?;
        Ok(())
    }

    /// Close and remove all pools (e.g., on shutdown)
    pub async fn close_all() {
        let manager = Self::instance();
        let mut pools = manager.pools.write().await;
        for (role, pool) in pools.drain() {
            pool.close().await;
            info!("Closed database pool: {:?}", role);
        }
    }

    /// Quote SQL identifier to prevent injection
    pub fn quote_identifier(name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }
}
