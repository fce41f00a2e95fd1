use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Registered pointer from a short config id to a data-center table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DataQueryConfig {
    pub id: Uuid,
    pub name: String,
    pub db_name: String,
    pub table_name: String,
    pub db_uri: Option<String>,
    pub enabled: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Listing shape returned by `GET /datas/configs`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataQueryConfigPublic {
    pub id: Uuid,
    pub name: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<DataQueryConfig> for DataQueryConfigPublic {
    fn from(config: DataQueryConfig) -> Self {
        Self {
            id: config.id,
            name: config.name,
            created_at: config.created_at,
        }
    }
}
