use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::AppError;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
/// Page sizes offered by the listing page.
pub const PAGE_SIZE_OPTIONS: [i64; 4] = [5, 10, 20, 50];

/// Number of neighbours shown on each side of the current page.
const WINDOW_RADIUS: i64 = 2;

/// Validated page and page size. Both are at least 1 and `page * limit` fits in an `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: i64,
    limit: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    pub fn new(page: i64, limit: i64) -> Result<Self, AppError> {
        if page < 1 || limit < 1 || page.checked_mul(limit).is_none() {
            return Err(AppError::invalid_argument());
        }
        Ok(Self { page, limit })
    }

    /// Builds from raw query values. Absent or empty values take the defaults.
    /// Integral decimal or exponent spellings such as `2.0` or `1e1` are accepted.
    pub fn parse(page: Option<&str>, limit: Option<&str>) -> Result<Self, AppError> {
        Self::new(
            parse_positive(page, DEFAULT_PAGE)?,
            parse_positive(limit, DEFAULT_LIMIT)?,
        )
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }
}

fn parse_positive(raw: Option<&str>, default: i64) -> Result<i64, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some(raw) => parse_integral(raw)
            .filter(|value| *value > 0)
            .ok_or_else(AppError::invalid_argument),
    }
}

fn parse_integral(raw: &str) -> Option<i64> {
    if let Ok(value) = raw.parse::<i64>() {
        return Some(value);
    }
    let value = raw.parse::<f64>().ok()?;
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
    if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Some(value as i64)
    } else {
        None
    }
}

// Helpers below are for clients rendering pagination controls.

/// Number of pages needed to show `total` rows, `limit` at a time.
pub fn total_pages(total: i64, limit: i64) -> i64 {
    if total <= 0 || limit <= 0 {
        return 0;
    }
    total / limit + i64::from(total % limit != 0)
}

/// The 1-based rows shown on a page, as in "Showing 11 to 20 of 23 results".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRange {
    pub start: i64,
    pub end: i64,
    pub total: i64,
}

impl PageRange {
    pub fn new(pagination: Pagination, total: i64) -> Self {
        let start = if total == 0 {
            0
        } else {
            pagination.offset() + 1
        };
        let end = (pagination.page * pagination.limit).min(total);
        Self { start, end, total }
    }
}

/// One entry of a pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLabel {
    Page(i64),
    Ellipsis,
}

impl fmt::Display for PageLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageLabel::Page(page) => write!(f, "{}", page),
            PageLabel::Ellipsis => f.write_str("..."),
        }
    }
}

impl Serialize for PageLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PageLabel::Page(page) => serializer.serialize_i64(*page),
            PageLabel::Ellipsis => serializer.serialize_str("..."),
        }
    }
}

/// Compresses `1..=total` into the labels shown around `current`, e.g.
/// `1 ... 3 4 5 6 7 ... 10`. The first page and the last page are always
/// present; a gap of any size collapses into one ellipsis.
pub fn page_window(current: i64, total: i64) -> Vec<PageLabel> {
    if total <= 1 {
        return vec![PageLabel::Page(1)];
    }

    let start = (current - WINDOW_RADIUS).max(1);
    let end = (current + WINDOW_RADIUS).min(total);

    let mut labels = vec![PageLabel::Page(1)];
    if start > 2 {
        labels.push(PageLabel::Ellipsis);
    }
    labels.extend(
        (start..=end)
            .filter(|page| *page != 1 && *page != total)
            .map(PageLabel::Page),
    );
    if end < total - 1 {
        labels.push(PageLabel::Ellipsis);
    }
    labels.push(PageLabel::Page(total));
    labels
}
