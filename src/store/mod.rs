use anyhow::Result;
use async_trait::async_trait;

use crate::types::{Advocate, Pagination};

mod postgres;

pub use postgres::PostgresStore;

/// What a single listing query asks the store for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    /// Case-insensitive substring to look for. `None` matches every row.
    pub term: Option<String>,
    pub pagination: Pagination,
}

/// One page of rows and the number of rows matching the filter overall.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub rows: Vec<T>,
    pub total: i64,
}

/// Read-only access to the advocate directory.
///
/// `rows` and `total` must come from the same snapshot. Rows are ordered by id.
#[async_trait]
pub trait AdvocateStore: Send + Sync {
    async fn search(&self, filter: &SearchFilter) -> Result<Page<Advocate>>;
}
