use sqlx::PgPool;
use tracing::info;

use crate::database::models::DataQuery;
use crate::database::rows::rows_to_maps;

use super::error::TableQueryError;
use super::types::QueryResult;

/// Run a stored query's SQL against the data-center database.
///
/// The statement executes inside a READ ONLY transaction that is always rolled
/// back, and `count` is the number of rows it returned. A column type with no
/// JSON mapping fails the query; the stored SQL should cast it to text.
pub async fn run_saved_query(pool: &PgPool, query: &DataQuery) -> Result<QueryResult, TableQueryError> {
    let failed = |source: sqlx::Error| TableQueryError::SavedQuery {
        name: query.name.clone(),
        source,
    };

    let mut tx = pool.begin().await.map_err(failed)?;
    sqlx::query("SET TRANSACTION READ ONLY")
        .execute(&mut *tx)
        .await
        .map_err(failed)?;

    let rows = sqlx::query(&query.sql).fetch_all(&mut *tx).await.map_err(failed)?;
    tx.rollback().await.map_err(failed)?;

    info!("Saved query '{}' returned {} rows", query.name, rows.len());

    let data = rows_to_maps(&rows).map_err(failed)?;
    let count = data.len() as i64;
    Ok(QueryResult { data, count })
}
