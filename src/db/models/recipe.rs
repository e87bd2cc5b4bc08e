// src/db/models/recipe.rs

//! Recipe model
//!
//! Recipes are written once, in a single batch, by the loader and are read
//! only afterwards. Every attribute is optional; the database assigns `id`.

use crate::db::predicate::{Predicate, build_where};
use crate::error::Result;
use rusqlite::{Connection, Row, params, params_from_iter};
use serde::Serialize;

/// Column list shared by every `SELECT`, in `from_row` order
const RECIPE_COLUMNS: &str = "id, cuisine, title, rating, prep_time, cook_time, total_time, \
     description, nutrients, serves";

/// A single recipe row
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: Option<i64>,
    pub cuisine: Option<String>,
    pub title: Option<String>,
    /// Always finite when present
    pub rating: Option<f64>,
    pub prep_time: Option<i32>,
    pub cook_time: Option<i32>,
    pub total_time: Option<i32>,
    pub description: Option<String>,
    /// Serialized JSON object, stored verbatim
    pub nutrients: Option<String>,
    pub serves: Option<String>,
}

impl Recipe {
    /// Create an empty recipe with every attribute absent
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert this recipe into the database
    pub fn insert(&mut self, conn: &Connection) -> Result<i64> {
        let mut stmt = conn.prepare_cached(
            "INSERT INTO recipes (cuisine, title, rating, prep_time, cook_time, total_time,
                                  description, nutrients, serves)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )?;

        stmt.execute(params![
            &self.cuisine,
            &self.title,
            &self.rating,
            &self.prep_time,
            &self.cook_time,
            &self.total_time,
            &self.description,
            &self.nutrients,
            &self.serves,
        ])?;

        let id = conn.last_insert_rowid();
        self.id = Some(id);
        Ok(id)
    }

    /// Insert every recipe, assigning ids in place
    ///
    /// Callers wanting all-or-nothing semantics run this inside a transaction.
    pub fn insert_all(conn: &Connection, recipes: &mut [Recipe]) -> Result<usize> {
        for recipe in recipes.iter_mut() {
            recipe.insert(conn)?;
        }
        Ok(recipes.len())
    }

    /// Total number of stored recipes
    pub fn count(conn: &Connection) -> Result<i64> {
        let count = conn.query_row("SELECT COUNT(*) FROM recipes", [], |row| row.get(0))?;
        Ok(count)
    }

    /// One page of recipes, highest rating first
    ///
    /// Recipes without a rating sort after every rated recipe; ties are
    /// broken by ascending id so consecutive pages never overlap.
    pub fn list_by_rating(conn: &Connection, offset: i64, limit: i64) -> Result<Vec<Self>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes
             ORDER BY rating IS NULL, rating DESC, id ASC
             LIMIT ?1 OFFSET ?2"
        ))?;

        let recipes = stmt
            .query_map(params![limit, offset], Self::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(recipes)
    }

    /// All recipes matching every predicate, in insertion order
    pub fn search(conn: &Connection, predicates: &[Predicate]) -> Result<Vec<Self>> {
        let clause = build_where(predicates);
        let mut stmt = conn.prepare(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes{} ORDER BY id",
            clause.sql
        ))?;

        let recipes = stmt
            .query_map(params_from_iter(clause.params.iter()), Self::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(recipes)
    }

    /// Convert a database row to a Recipe
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: Some(row.get(0)?),
            cuisine: row.get(1)?,
            title: row.get(2)?,
            rating: row.get(3)?,
            prep_time: row.get(4)?,
            cook_time: row.get(5)?,
            total_time: row.get(6)?,
            description: row.get(7)?,
            nutrients: row.get(8)?,
            serves: row.get(9)?,
        })
    }
}
