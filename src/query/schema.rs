//! Live schema introspection.
//!
//! Nothing here is cached: every call goes back to the database catalog, so a
//! table that is created, dropped or altered is seen by the very next request.

use async_trait::async_trait;
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::database::manager::DatabaseManager;
use crate::database::rows;

use super::error::TableQueryError;

/// One reflected column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct ColumnInfo {
    pub name: String,
    pub data_type: String,
    /// Underlying Postgres type name, e.g. `int4` or `_text` for `text[]`
    pub udt_name: String,
    pub is_nullable: bool,
}

impl ColumnInfo {
    /// Nullable column whose catalog type and underlying type are both `udt_name`
    pub fn new(name: impl Into<String>, udt_name: impl Into<String>) -> Self {
        let udt_name = udt_name.into();
        Self {
            name: name.into(),
            data_type: udt_name.clone(),
            udt_name,
            is_nullable: true,
        }
    }

    /// SELECT-list expression for this column. Types without a native JSON
    /// decoding are read back as their text rendering.
    pub fn select_expr(&self) -> String {
        let quoted = DatabaseManager::quote_identifier(&self.name);
        if rows::decodes_natively(&self.udt_name) {
            quoted
        } else {
            format!("{}::text AS {}", quoted, quoted)
        }
    }
}

/// Columns of a table in catalog (ordinal) order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ColumnSet {
    columns: Vec<ColumnInfo>,
}

impl ColumnSet {
    pub fn new(columns: Vec<ColumnInfo>) -> Self {
        Self { columns }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&ColumnInfo> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ColumnInfo> {
        self.columns.iter()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// True when every column can be selected without a text cast
    pub fn all_native(&self) -> bool {
        self.columns.iter().all(|c| rows::decodes_natively(&c.udt_name))
    }
}

impl FromIterator<ColumnInfo> for ColumnSet {
    fn from_iter<I: IntoIterator<Item = ColumnInfo>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Capability to reflect table names and columns from a live database
#[async_trait]
pub trait SchemaProvider: Send + Sync {
    /// Names of every table the connection can see
    async fn table_names(&self) -> Result<Vec<String>, TableQueryError>;

    /// Columns of `table`, which the caller has already confirmed exists
    async fn columns(&self, table: &str) -> Result<ColumnSet, TableQueryError>;
}

/// Postgres catalog-backed provider, scoped to the connection's current schema
#[derive(Clone)]
pub struct PgSchemaProvider {
    pool: PgPool,
}

impl PgSchemaProvider {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

const TABLE_NAMES_SQL: &str = r#"
    SELECT table_name::text
    FROM information_schema.tables
    WHERE table_schema = current_schema()
    AND table_type = 'BASE TABLE'
    ORDER BY table_name
"#;

const COLUMNS_SQL: &str = r#"
    SELECT
        column_name::text AS name,
        data_type::text AS data_type,
        udt_name::text AS udt_name,
        (is_nullable = 'YES') AS is_nullable
    FROM information_schema.columns
    WHERE table_schema = current_schema()
    AND table_name = $1
    ORDER BY ordinal_position
"#;

#[async_trait]
impl SchemaProvider for PgSchemaProvider {
    async fn table_names(&self) -> Result<Vec<String>, TableQueryError> {
        sqlx::query_scalar::<_, String>(TABLE_NAMES_SQL)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| TableQueryError::query_execution("information_schema.tables", e))
    }

    async fn columns(&self, table: &str) -> Result<ColumnSet, TableQueryError> {
        let columns = sqlx::query_as::<_, ColumnInfo>(COLUMNS_SQL)
            .bind(table)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| TableQueryError::schema_load(table, e))?;

        // The table was listed a moment ago; an empty result means it vanished
        // or is not readable with this role
        if columns.is_empty() {
            return Err(TableQueryError::schema_load(table, "no columns could be reflected"));
        }

        Ok(ColumnSet::new(columns))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn articles() -> ColumnSet {
        ["id", "url", "title", "publish_time", "body"]
            .into_iter()
            .map(|n| ColumnInfo::new(n, "text"))
            .collect()
    }

    #[test]
    fn column_set_lookup() {
        let set = articles();
        assert_eq!(set.len(), 5);
        assert!(set.contains("publish_time"));
        assert!(!set.contains("Publish_Time"));
        assert_eq!(set.get("url").map(|c| c.data_type.as_str()), Some("text"));
    }

    #[test]
    fn column_set_keeps_catalog_order() {
        let set = articles();
        let names: Vec<&str> = set.names().collect();
        assert_eq!(names, vec!["id", "url", "title", "publish_time", "body"]);
    }

    #[test]
    fn column_set_serializes_as_list() {
        let set = ColumnSet::new(vec![ColumnInfo::new("a", "integer")]);
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{
                "name": "a",
                "data_type": "integer",
                "udt_name": "integer",
                "is_nullable": true
            }])
        );
    }

    #[test]
    fn natively_decoded_columns_are_selected_as_is() {
        assert_eq!(ColumnInfo::new("publish_time", "timestamptz").select_expr(), "\"publish_time\"");
        assert_eq!(ColumnInfo::new("tags", "_text").select_expr(), "\"tags\"");
    }

    #[test]
    fn other_columns_are_cast_to_text() {
        assert_eq!(ColumnInfo::new("addr", "inet").select_expr(), "\"addr\"::text AS \"addr\"");
        assert_eq!(ColumnInfo::new("price", "numeric").select_expr(), "\"price\"::text AS \"price\"");

        let set = ColumnSet::new(vec![ColumnInfo::new("id", "int8"), ColumnInfo::new("blob", "money")]);
        assert!(!set.all_native());
    }
}
