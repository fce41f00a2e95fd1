use std::time::Instant;

use sqlx::PgPool;
use tracing::{debug, info};

use crate::database::manager::DatabaseManager;
use crate::database::rows::{row_to_map, rows_to_maps, RowMap};

use super::error::TableQueryError;
use super::projection::{build_ordering, build_projection, OrderBy, Projection, TARGET_COLUMNS};
use super::schema::{ColumnSet, PgSchemaProvider, SchemaProvider};
use super::types::{Page, QueryResult};

/// Resolves a caller-supplied table name into an executable, validated plan
pub struct TableQueryResolver<P> {
    provider: P,
}

impl TableQueryResolver<PgSchemaProvider> {
    pub fn for_pool(pool: PgPool) -> Self {
        Self::new(PgSchemaProvider::new(pool))
    }
}

impl<P: SchemaProvider> TableQueryResolver<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub async fn table_exists(&self, table: &str) -> Result<bool, TableQueryError> {
        Ok(self.introspected_name(table).await?.is_some())
    }

    /// The matching name exactly as the catalog reported it
    async fn introspected_name(&self, table: &str) -> Result<Option<String>, TableQueryError> {
        let names = self.provider.table_names().await?;
        Ok(names.into_iter().find(|name| name == table))
    }

    pub async fn load_columns(&self, table: &str) -> Result<ColumnSet, TableQueryError> {
        self.provider.columns(table).await
    }

    /// Validate the table, reflect its columns and derive projection and ordering.
    ///
    /// Only the catalog's own spelling of the name is carried into the plan, so
    /// the caller's string never reaches generated SQL.
    pub async fn plan(&self, table: &str) -> Result<TablePlan, TableQueryError> {
        let table = self
            .introspected_name(table)
            .await?
            .ok_or_else(|| TableQueryError::NotFound(table.to_string()))?;

        let columns = self.load_columns(&table).await?;
        let projection = build_projection(&columns, TARGET_COLUMNS);
        let ordering = build_ordering(&columns);

        debug!(
            "Planned query for {}: projection={:?} ordering={:?}",
            table, projection, ordering
        );

        Ok(TablePlan {
            table,
            columns,
            projection,
            ordering,
        })
    }
}

/// A table query whose identifiers all came from live introspection
#[derive(Debug, Clone)]
pub struct TablePlan {
    table: String,
    columns: ColumnSet,
    projection: Projection,
    ordering: Option<OrderBy>,
}

impl TablePlan {
    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn ordering(&self) -> Option<&OrderBy> {
        self.ordering.as_ref()
    }

    pub fn count_sql(&self) -> String {
        format!(
            "SELECT COUNT(*) AS count FROM {}",
            DatabaseManager::quote_identifier(&self.table)
        )
    }

    /// Row query; `$1` is the offset and `$2` the limit
    pub fn select_sql(&self) -> String {
        let mut sql = format!(
            "SELECT {} FROM {}",
            self.projection.to_sql(&self.columns),
            DatabaseManager::quote_identifier(&self.table)
        );
        if let Some(order) = &self.ordering {
            sql.push(' ');
            sql.push_str(&order.to_sql());
        }
        sql.push_str(" OFFSET $1 LIMIT $2");
        sql
    }

    /// Full-row lookup by `id`; `$1` is the id
    pub fn detail_sql(&self) -> Result<String, TableQueryError> {
        if !self.columns.contains("id") {
            return Err(TableQueryError::MissingColumn {
                table: self.table.clone(),
                column: "id",
            });
        }
        Ok(format!(
            "SELECT {} FROM {} WHERE \"id\" = $1",
            Projection::AllColumns.to_sql(&self.columns),
            DatabaseManager::quote_identifier(&self.table)
        ))
    }

    /// Count the whole table and fetch one page of rows.
    ///
    /// The two statements run independently on the pool, so under concurrent
    /// writes the count and the rows may reflect different moments.
    pub async fn execute(&self, pool: &PgPool, page: Page) -> Result<QueryResult, TableQueryError> {
        let started = Instant::now();
        let count_sql = self.count_sql();
        let select_sql = self.select_sql();
        debug!("{} | {}", count_sql, select_sql);

        let count = sqlx::query_scalar::<_, i64>(&count_sql).fetch_one(pool);
        let rows = sqlx::query(&select_sql)
            .bind(i64::from(page.offset))
            .bind(i64::from(page.limit))
            .fetch_all(pool);

        let (count, rows) = futures::try_join!(count, rows)
            .map_err(|e| TableQueryError::query_execution(&self.table, e))?;
        let data = rows_to_maps(&rows).map_err(|e| TableQueryError::query_execution(&self.table, e))?;

        info!(
            "Queried {} rows (offset {}, limit {}) of {} from {} in {:?}",
            rows.len(),
            page.offset,
            page.limit,
            count,
            self.table,
            started.elapsed()
        );

        Ok(QueryResult { data, count })
    }

    pub async fn fetch_by_id(&self, pool: &PgPool, id: i64) -> Result<Option<RowMap>, TableQueryError> {
        let sql = self.detail_sql()?;
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| TableQueryError::query_execution(&self.table, e))?;
        row.as_ref()
            .map(row_to_map)
            .transpose()
            .map_err(|e| TableQueryError::query_execution(&self.table, e))
    }
}
