//! Dynamic table queries over tables whose shape is only known at runtime.

pub mod error;
pub mod projection;
pub mod resolver;
pub mod saved;
pub mod schema;
pub mod types;

pub use error::TableQueryError;
pub use projection::{build_ordering, build_projection, OrderBy, Projection, TARGET_COLUMNS, TIMESTAMP_COLUMN};
pub use resolver::{TablePlan, TableQueryResolver};
pub use saved::run_saved_query;
pub use schema::{ColumnInfo, ColumnSet, PgSchemaProvider, SchemaProvider};
pub use types::{Page, QueryResult, SortDirection};

use sqlx::PgPool;

/// Validate, reflect and query `table` in one call
pub async fn query_table(pool: &PgPool, table: &str, page: Page) -> Result<QueryResult, TableQueryError> {
    let resolver = TableQueryResolver::for_pool(pool.clone());
    let plan = resolver.plan(table).await?;
    plan.execute(pool, page).await
}
