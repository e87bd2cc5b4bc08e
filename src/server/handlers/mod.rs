// src/server/handlers/mod.rs
//! HTTP request handlers for the recipe server

pub mod recipes;
