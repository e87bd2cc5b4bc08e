// src/query/mod.rs

//! Read side of the recipe store: paginated listing and filtered search
//!
//! Both operations are thin wrappers over `Recipe` queries. Input is never
//! rejected; out-of-range paging values are clamped and malformed filters are
//! dropped (see `filter`). Only database failures produce errors.

pub mod filter;

pub use filter::{Bounds, SearchCriteria, parse_rating, parse_total_time};

use crate::db::models::Recipe;
use crate::error::Result;
use rusqlite::Connection;
use serde::Serialize;
use tracing::debug;

/// Page used when none (or one below 1) is requested
pub const DEFAULT_PAGE: i64 = 1;
/// Page size used when none (or one below 1) is requested
pub const DEFAULT_LIMIT: i64 = 10;

/// A validated page request; `page` is 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    /// Clamp raw values: a missing or sub-1 page becomes 1, a missing or
    /// sub-1 limit becomes the default. No upper bound is applied to `limit`.
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        let page = page.filter(|p| *p >= 1).unwrap_or(DEFAULT_PAGE);
        let limit = limit.filter(|l| *l >= 1).unwrap_or(DEFAULT_LIMIT);
        Self { page, limit }
    }

    /// Row offset of the first record on this page
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One page of recipes ordered by rating, with the total record count
#[derive(Debug, Clone, Serialize)]
pub struct RecipePage {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub data: Vec<Recipe>,
}

/// Every recipe matching a search
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    pub data: Vec<Recipe>,
}

/// List recipes highest-rated first; unrated recipes come last
pub fn list_recipes(conn: &Connection, request: PageRequest) -> Result<RecipePage> {
    debug!("Fetching recipes sorted by rating: {:?}", request);

    let total = Recipe::count(conn)?;
    let data = Recipe::list_by_rating(conn, request.offset(), request.limit)?;

    debug!("Retrieved {} recipes out of {} total", data.len(), total);
    Ok(RecipePage {
        page: request.page,
        limit: request.limit,
        total,
        data,
    })
}

/// Find recipes matching every supplied criterion
pub fn search_recipes(conn: &Connection, criteria: &SearchCriteria) -> Result<SearchResults> {
    let predicates = criteria.predicates();
    debug!(
        "Searching recipes with {} predicate(s): {}",
        predicates.len(),
        predicates
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" AND ")
    );

    let data = Recipe::search(conn, &predicates)?;

    debug!("Search returned {} recipes", data.len());
    Ok(SearchResults { data })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_defaults() {
        assert_eq!(PageRequest::default(), PageRequest { page: 1, limit: 10 });
    }

    #[test]
    fn test_page_request_clamps() {
        assert_eq!(PageRequest::new(Some(0), Some(0)), PageRequest { page: 1, limit: 10 });
        assert_eq!(PageRequest::new(Some(-5), Some(-1)), PageRequest { page: 1, limit: 10 });
        assert_eq!(PageRequest::new(Some(3), Some(1000)), PageRequest { page: 3, limit: 1000 });
    }

    #[test]
    fn test_offset() {
        assert_eq!(PageRequest::new(Some(1), Some(10)).offset(), 0);
        assert_eq!(PageRequest::new(Some(3), Some(25)).offset(), 50);
        assert_eq!(PageRequest::new(Some(i64::MAX), Some(i64::MAX)).offset(), i64::MAX);
    }
}
