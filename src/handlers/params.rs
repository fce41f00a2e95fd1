use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use serde::Deserialize;

use crate::error::ApiError;
use crate::query::Page;

/// `?offset=&limit=` pagination; `skip` is accepted as an alias of `offset`
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    #[serde(alias = "skip")]
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

impl PageQuery {
    pub fn page(&self) -> Page {
        Page::new(self.offset, self.limit)
    }
}

/// Page from an extracted query string; malformed values become a JSON 400
pub fn page_from(query: Result<Query<PageQuery>, QueryRejection>) -> Result<Page, ApiError> {
    let Query(query) = query.map_err(|rejection| {
        ApiError::bad_request(format!("Invalid pagination: {}", rejection.body_text()))
    })?;
    Ok(query.page())
}
