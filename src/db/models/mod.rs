// src/db/models/mod.rs

//! Data models for recipe database entities
//!
//! Each struct corresponds to a database table and carries the methods for
//! creating and reading its rows.

mod recipe;

pub use recipe::Recipe;
