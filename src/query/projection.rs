use crate::database::manager::DatabaseManager;

use super::schema::ColumnSet;
use super::types::SortDirection;

/// Columns worth showing in a table summary, in display order
pub const TARGET_COLUMNS: &[&str] = &["id", "url", "title", "publish_time"];

/// Newest-first ordering is applied when a table has this column
pub const TIMESTAMP_COLUMN: &str = "publish_time";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    /// Explicit column list, in the given order
    Columns(Vec<String>),
    /// `SELECT *` in the table's natural column order
    AllColumns,
}

impl Projection {
    /// Render the SELECT list. `columns` supplies each column's type so values
    /// without a native JSON decoding come back as text; when every column
    /// decodes natively, all-columns is plain `*`.
    pub fn to_sql(&self, columns: &ColumnSet) -> String {
        match self {
            Projection::Columns(names) => names
                .iter()
                .map(|name| match columns.get(name) {
                    Some(column) => column.select_expr(),
                    None => DatabaseManager::quote_identifier(name),
                })
                .collect::<Vec<_>>()
                .join(", "),
            Projection::AllColumns if columns.all_native() => "*".to_string(),
            Projection::AllColumns => columns
                .iter()
                .map(|column| column.select_expr())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub column: String,
    pub direction: SortDirection,
}

impl OrderBy {
    pub fn to_sql(&self) -> String {
        format!(
            "ORDER BY {} {}",
            DatabaseManager::quote_identifier(&self.column),
            self.direction.to_sql()
        )
    }
}

/// Keep the allow-listed columns the table actually has, in allow-list order.
/// Falls back to every column when none of them are present.
pub fn build_projection(columns: &ColumnSet, allow_list: &[&str]) -> Projection {
    let selected: Vec<String> = allow_list
        .iter()
        .filter_map(|name| columns.get(name))
        .map(|c| c.name.clone())
        .collect();

    if selected.is_empty() {
        Projection::AllColumns
    } else {
        Projection::Columns(selected)
    }
}

pub fn build_ordering(columns: &ColumnSet) -> Option<OrderBy> {
    columns.get(TIMESTAMP_COLUMN).map(|c| OrderBy {
        column: c.name.clone(),
        direction: SortDirection::Desc,
    })
}
