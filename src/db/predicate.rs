// src/db/predicate.rs

//! Explicit predicate builder for recipe searches
//!
//! A search is a list of `(column, operator, value)` constraints built only
//! from the filters the caller actually supplied. The list is rendered into a
//! single `WHERE` clause joined by `AND`, with every value bound as a
//! positional parameter. An empty list renders to no clause at all.

use crate::db::LOWER_UNICODE;
use rusqlite::types::Value;
use std::fmt;

/// Searchable recipe columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Cuisine,
    Title,
    Rating,
    TotalTime,
}

impl Column {
    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Cuisine => "cuisine",
            Column::Title => "title",
            Column::Rating => "rating",
            Column::TotalTime => "total_time",
        }
    }
}

/// Comparison applied between a column and a bound value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// Exact, case-sensitive equality
    Equals,
    /// Case-insensitive substring match, Unicode lowercase on both sides
    Contains,
    /// Inclusive lower bound
    AtLeast,
    /// Inclusive upper bound
    AtMost,
}

/// A single search constraint
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub column: Column,
    pub operator: Operator,
    pub value: Value,
}

impl Predicate {
    pub fn new(column: Column, operator: Operator, value: impl Into<Value>) -> Self {
        Self {
            column,
            operator,
            value: value.into(),
        }
    }

    pub fn equals(column: Column, value: impl Into<Value>) -> Self {
        Self::new(column, Operator::Equals, value)
    }

    pub fn contains(column: Column, needle: &str) -> Self {
        Self::new(column, Operator::Contains, needle.to_string())
    }

    pub fn at_least(column: Column, value: impl Into<Value>) -> Self {
        Self::new(column, Operator::AtLeast, value)
    }

    pub fn at_most(column: Column, value: impl Into<Value>) -> Self {
        Self::new(column, Operator::AtMost, value)
    }

    /// Render this predicate as SQL with `?{index}` as its placeholder,
    /// returning the SQL fragment and the value to bind
    fn render(&self, index: usize) -> (String, Value) {
        let column = self.column.as_str();
        match self.operator {
            Operator::Equals => (format!("{column} = ?{index}"), self.value.clone()),
            Operator::AtLeast => (format!("{column} >= ?{index}"), self.value.clone()),
            Operator::AtMost => (format!("{column} <= ?{index}"), self.value.clone()),
            Operator::Contains => {
                let needle = match &self.value {
                    Value::Text(s) => s.clone(),
                    Value::Integer(i) => i.to_string(),
                    Value::Real(f) => f.to_string(),
                    _ => String::new(),
                };
                (
                    format!("{LOWER_UNICODE}({column}) LIKE ?{index} ESCAPE '\\'"),
                    Value::Text(format!("%{}%", escape_like(&needle.to_lowercase()))),
                )
            }
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self.operator {
            Operator::Equals => "=",
            Operator::Contains => "~",
            Operator::AtLeast => ">=",
            Operator::AtMost => "<=",
        };
        write!(f, "{} {} {:?}", self.column.as_str(), op, self.value)
    }
}

/// A rendered `WHERE` clause and its positional parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WhereClause {
    /// Either empty or ` WHERE ...` (leading space included)
    pub sql: String,
    pub params: Vec<Value>,
}

/// Combine predicates with `AND` into one parameterized clause
pub fn build_where(predicates: &[Predicate]) -> WhereClause {
    if predicates.is_empty() {
        return WhereClause::default();
    }

    let mut fragments = Vec::with_capacity(predicates.len());
    let mut params = Vec::with_capacity(predicates.len());

    for (i, predicate) in predicates.iter().enumerate() {
        let (fragment, value) = predicate.render(i + 1);
        fragments.push(fragment);
        params.push(value);
    }

    WhereClause {
        sql: format!(" WHERE {}", fragments.join(" AND ")),
        params,
    }
}

/// Escape `LIKE` wildcards so the needle matches literally
fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
