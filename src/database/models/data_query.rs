use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Saved SQL text attached to a query config
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DataQuery {
    pub id: Uuid,
    pub name: String,
    pub sql: String,
    pub config_id: Uuid,
    pub enabled: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataQueryPublic {
    pub id: Uuid,
    pub name: String,
    pub sql: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<DataQuery> for DataQueryPublic {
    fn from(query: DataQuery) -> Self {
        Self {
            id: query.id,
            name: query.name,
            sql: query.sql,
            created_at: query.created_at,
        }
    }
}
