use thiserror::Error;

use crate::database::manager::DatabaseError;

#[derive(Error, Debug)]
pub enum TableQueryError {
    #[error("Table '{0}' not found")]
    NotFound(String),

    #[error("Error loading table '{table}': {reason}")]
    SchemaLoad { table: String, reason: String },

    #[error("Table '{table}' has no '{column}' column")]
    MissingColumn { table: String, column: &'static str },

    #[error("Query on table '{table}' failed: {source}")]
    QueryExecution {
        table: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Saved query '{name}' failed: {source}")]
    SavedQuery {
        name: String,
        #[source]
        source: sqlx::Error,
    },

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl TableQueryError {
    pub fn schema_load(table: impl Into<String>, reason: impl ToString) -> Self {
        TableQueryError::SchemaLoad {
            table: table.into(),
            reason: reason.to_string(),
        }
    }

    pub fn query_execution(table: impl Into<String>, source: sqlx::Error) -> Self {
        TableQueryError::QueryExecution {
            table: table.into(),
            source,
        }
    }
}
