use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    error::AppError,
    store::{AdvocateStore, SearchFilter},
    types::{Advocate, Pagination},
};

/// Raw query string of a listing request. Values are validated by [`SearchRequest::parse`].
///
/// `page` and `limit` accept any spelling of a positive integer, including `2.0` and `1e1`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub term: Option<String>,
    pub pagination: Pagination,
}

impl SearchRequest {
    pub fn parse(params: &SearchParams) -> Result<Self, AppError> {
        Ok(Self {
            term: params.search.clone().filter(|term| !term.is_empty()),
            pagination: Pagination::parse(params.page.as_deref(), params.limit.as_deref())?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub data: Vec<Advocate>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

/// Validates the request and runs it as a single store query.
pub async fn search(
    store: &dyn AdvocateStore,
    params: &SearchParams,
) -> Result<SearchResult, AppError> {
    let request = SearchRequest::parse(params)?;
    let filter = SearchFilter {
        term: request.term,
        pagination: request.pagination,
    };

    let page = store.search(&filter).await?;
    info!(
        "Listed {} of {} advocates (page {}, limit {})",
        page.rows.len(),
        page.total,
        filter.pagination.page(),
        filter.pagination.limit()
    );

    Ok(SearchResult {
        data: page.rows,
        total: page.total,
        page: filter.pagination.page(),
        limit: filter.pagination.limit(),
    })
}
