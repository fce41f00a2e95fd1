use serde::{Deserialize, Serialize};

use crate::config;
use crate::database::rows::RowMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Offset/limit window over a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub offset: u32,
    pub limit: u32,
}

impl Page {
    /// Page from caller input, using the configured default size and cap
    pub fn new(offset: Option<u32>, limit: Option<u32>) -> Self {
        let settings = &config::config().query;
        Self::with_bounds(offset, limit, settings.default_limit, settings.max_limit)
    }

    pub fn with_bounds(
        offset: Option<u32>,
        limit: Option<u32>,
        default_limit: u32,
        max_limit: Option<u32>,
    ) -> Self {
        let requested = limit.unwrap_or(default_limit);
        let limit = match max_limit {
            Some(max) => requested.min(max),
            None => requested,
        };
        Self {
            offset: offset.unwrap_or(0),
            limit,
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self { offset: 0, limit: 100 }
    }
}

/// Rows of one page plus the table's total row count
#[derive(Debug, Clone, Default, Serialize)]
pub struct QueryResult {
    pub data: Vec<RowMap>,
    pub count: i64,
}
