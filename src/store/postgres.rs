use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use deadpool_postgres::Pool as PostgresPool;
use log::debug;
use tokio_postgres::{types::Json, Row};

use super::{AdvocateStore, Page, SearchFilter};
use crate::types::Advocate;

/// Filtered set, total and page in one statement. The outer LEFT JOIN keeps
/// the count row when the offset is past the last match.
const SEARCH_ADVOCATES: &str = "
    WITH filtered AS (
        SELECT id, first_name, last_name, city, degree, payload, years_of_experience, phone_number, created_at
        FROM advocates
        WHERE $1::text IS NULL
            OR first_name ILIKE $1
            OR last_name ILIKE $1
            OR city ILIKE $1
            OR degree ILIKE $1
            OR payload::text ILIKE $1
    ),
    page AS (
        SELECT * FROM filtered ORDER BY id OFFSET $2 LIMIT $3
    )
    SELECT counted.total, page.*
    FROM (SELECT COUNT(*) AS total FROM filtered) AS counted
    LEFT JOIN page ON TRUE
    ORDER BY page.id
";

#[derive(Clone)]
pub struct PostgresStore {
    pool: PostgresPool,
}

impl PostgresStore {
    pub fn new(pool: PostgresPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdvocateStore for PostgresStore {
    async fn search(&self, filter: &SearchFilter) -> Result<Page<Advocate>> {
        let postgres = self.pool.get().await?;
        let pattern = filter.term.as_deref().map(like_pattern);
        debug!(
            "Searching advocates pattern={:?} offset={} limit={}",
            pattern,
            filter.pagination.offset(),
            filter.pagination.limit()
        );

        let results = postgres
            .query(
                SEARCH_ADVOCATES,
                &[
                    &pattern,
                    &filter.pagination.offset(),
                    &filter.pagination.limit(),
                ],
            )
            .await?;

        let total = match results.first() {
            Some(row) => row.try_get::<_, i64>("total")?,
            None => 0,
        };
        let rows = results
            .iter()
            .filter_map(|row| match row.try_get::<_, Option<i32>>("id") {
                Ok(Some(id)) => Some(advocate_from_row(id, row)),
                Ok(None) => None,
                Err(e) => Some(Err(e.into())),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Page { rows, total })
    }
}

fn advocate_from_row(id: i32, row: &Row) -> Result<Advocate> {
    Ok(Advocate {
        id,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        city: row.try_get("city")?,
        degree: row.try_get("degree")?,
        specialties: row
            .try_get::<_, Option<Json<Vec<String>>>>("payload")?
            .map(|Json(specialties)| specialties)
            .unwrap_or_default(),
        years_of_experience: row.try_get("years_of_experience")?,
        phone_number: row.try_get("phone_number")?,
        created_at: row
            .try_get::<_, Option<NaiveDateTime>>("created_at")?
            .map(|created_at| created_at.and_utc()),
    })
}

/// Wraps a term for ILIKE so it matches as a literal substring.
pub(crate) fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
