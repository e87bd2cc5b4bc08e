// src/query/filter.rs

//! Lenient parsing of search filters
//!
//! Filters arrive as raw query-string values. Nothing here rejects input:
//! an unrecognized comparison prefix or an unparseable number simply leaves
//! that bound unset, which widens the search instead of failing it.

use crate::db::predicate::{Column, Predicate};
use tracing::debug;

/// Inclusive bounds parsed from a comparison string
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds<T> {
    pub min: Option<T>,
    pub max: Option<T>,
}

impl<T: Copy> Bounds<T> {
    fn exact(value: Option<T>) -> Self {
        Self {
            min: value,
            max: value,
        }
    }
}

/// Parse `>=x`, `<=x` or `=x` into rating bounds
pub fn parse_rating(raw: &str) -> Bounds<f64> {
    let raw = raw.trim();
    let bounds = if let Some(rest) = raw.strip_prefix(">=") {
        Bounds {
            min: parse_real(rest),
            max: None,
        }
    } else if let Some(rest) = raw.strip_prefix("<=") {
        Bounds {
            min: None,
            max: parse_real(rest),
        }
    } else if let Some(rest) = raw.strip_prefix('=') {
        Bounds::exact(parse_real(rest))
    } else {
        Bounds::default()
    };

    debug!("Parsed rating '{}' as {:?}", raw, bounds);
    bounds
}

/// Parse `<=n` or `=n` into total time bounds (minutes)
pub fn parse_total_time(raw: &str) -> Bounds<i32> {
    let raw = raw.trim();
    let bounds = if let Some(rest) = raw.strip_prefix("<=") {
        Bounds {
            min: None,
            max: parse_integer(rest),
        }
    } else if let Some(rest) = raw.strip_prefix('=') {
        Bounds::exact(parse_integer(rest))
    } else {
        Bounds::default()
    };

    debug!("Parsed total_time '{}' as {:?}", raw, bounds);
    bounds
}

/// `Infinity` is a usable bound; `NaN` compares to nothing and is dropped
fn parse_real(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

fn parse_integer(s: &str) -> Option<i32> {
    s.trim().parse::<i32>().ok()
}

/// Every optional search constraint, already parsed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchCriteria {
    pub cuisine: Option<String>,
    pub title: Option<String>,
    pub rating: Bounds<f64>,
    pub total_time: Bounds<i32>,
}

impl SearchCriteria {
    /// Build criteria from raw request values; blank values count as absent
    pub fn from_raw(
        cuisine: Option<&str>,
        title: Option<&str>,
        rating: Option<&str>,
        total_time: Option<&str>,
    ) -> Self {
        Self {
            cuisine: non_blank(cuisine).map(str::to_string),
            title: non_blank(title).map(str::to_string),
            rating: non_blank(rating).map(parse_rating).unwrap_or_default(),
            total_time: non_blank(total_time)
                .map(parse_total_time)
                .unwrap_or_default(),
        }
    }

    /// Constraints for exactly the filters that are set
    pub fn predicates(&self) -> Vec<Predicate> {
        let mut predicates = Vec::new();

        if let Some(cuisine) = &self.cuisine {
            predicates.push(Predicate::equals(Column::Cuisine, cuisine.clone()));
        }
        if let Some(title) = &self.title {
            predicates.push(Predicate::contains(Column::Title, title));
        }
        if let Some(min) = self.rating.min {
            predicates.push(Predicate::at_least(Column::Rating, min));
        }
        if let Some(max) = self.rating.max {
            predicates.push(Predicate::at_most(Column::Rating, max));
        }
        if let Some(min) = self.total_time.min {
            predicates.push(Predicate::at_least(Column::TotalTime, min));
        }
        if let Some(max) = self.total_time.max {
            predicates.push(Predicate::at_most(Column::TotalTime, max));
        }

        predicates
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
