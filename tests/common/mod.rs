// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

#![allow(dead_code)]

use recipe_server::db;
use recipe_server::{DocumentSource, Loader, LoaderConfig, Recipe};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create an empty, migrated test database.
///
/// Returns (TempDir, db_path) - keep the TempDir alive to prevent cleanup.
pub fn setup_test_db() -> (TempDir, PathBuf) {
    let temp_dir = tempfile::tempdir().unwrap();
    let db_path = temp_dir.path().join("test.db");
    db::init(&db_path).unwrap();
    (temp_dir, db_path)
}

/// Write a recipe document next to the test database.
pub fn write_document(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("recipes.json");
    std::fs::write(&path, content).unwrap();
    path
}

/// A loader reading the given file, with ingestion enabled.
pub fn file_loader(path: &Path) -> Loader {
    Loader::new(LoaderConfig {
        enabled: true,
        source: DocumentSource::File(path.to_path_buf()),
    })
}

fn recipe(
    title: &str,
    cuisine: &str,
    rating: Option<f64>,
    total_time: Option<i32>,
) -> Recipe {
    Recipe {
        title: Some(title.to_string()),
        cuisine: Some(cuisine.to_string()),
        rating,
        total_time,
        ..Recipe::new()
    }
}

/// Insert a small, fixed catalog directly (bypassing the loader).
///
/// | title               | cuisine  | rating | total_time |
/// |---------------------|----------|--------|------------|
/// | Chicken Soup        | American | 4.5    | 45         |
/// | Apple Pie           | American | 4.8    | 90         |
/// | Pad Thai            | Thai     | -      | 30         |
/// | Green Curry         | Thai     | 3.9    | 40         |
/// | Fried Chicken       | Southern | 4.5    | -          |
/// | Spicy Chicken Wings | American | 4.2    | 30         |
pub fn seed_recipes(conn: &mut Connection) {
    let mut recipes = vec![
        recipe("Chicken Soup", "American", Some(4.5), Some(45)),
        recipe("Apple Pie", "American", Some(4.8), Some(90)),
        recipe("Pad Thai", "Thai", None, Some(30)),
        recipe("Green Curry", "Thai", Some(3.9), Some(40)),
        recipe("Fried Chicken", "Southern", Some(4.5), None),
        recipe("Spicy Chicken Wings", "American", Some(4.2), Some(30)),
    ];

    let tx = conn.transaction().unwrap();
    Recipe::insert_all(&tx, &mut recipes).unwrap();
    tx.commit().unwrap();
}

/// Titles of the given recipes, in order.
pub fn titles(recipes: &[Recipe]) -> Vec<String> {
    recipes
        .iter()
        .map(|r| r.title.clone().unwrap_or_default())
        .collect()
}
