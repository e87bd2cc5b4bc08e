// src/loader/mod.rs

//! One-time bulk ingestion of the recipe document
//!
//! The document is a single JSON object whose member values are recipe
//! records (member keys are discarded). It is streamed member by member;
//! each member is converted on its own, so one malformed record is skipped
//! and counted without affecting the rest. Only a document that cannot be
//! read or is not a JSON object fails the load.
//!
//! Loading is guarded by a row count: once any recipe is stored, further
//! loads are no-ops. The final count check and the batch insert share one
//! `IMMEDIATE` transaction, so two loaders racing on the same database can
//! never both insert.

pub mod convert;
pub mod nonfinite;
pub mod source;

pub use convert::{RecordError, recipe_from_value};
pub use nonfinite::NonFiniteLiterals;
pub use source::DocumentSource;

use crate::db::models::Recipe;
use crate::error::Result;
use rusqlite::{Connection, TransactionBehavior};
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use std::fmt;
use std::io::{BufReader, Read};
use tracing::{debug, info, warn};

/// How often the loader reports progress while converting
const PROGRESS_INTERVAL: usize = 1000;

/// Loader settings
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Ingestion on/off switch
    pub enabled: bool,
    /// Where the document is read from
    pub source: DocumentSource,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            source: DocumentSource::Bundled,
        }
    }
}

/// What a call to `load_if_needed` ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// Ingestion is switched off
    Disabled,
    /// The store already held recipes
    AlreadyLoaded,
    /// The document source does not exist
    SourceMissing,
    /// The document held no convertible records
    Empty,
    /// Records were inserted
    Loaded,
}

impl LoadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadStatus::Disabled => "disabled",
            LoadStatus::AlreadyLoaded => "already_loaded",
            LoadStatus::SourceMissing => "source_missing",
            LoadStatus::Empty => "empty",
            LoadStatus::Loaded => "loaded",
        }
    }
}

/// Statistics from one load attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOutcome {
    pub status: LoadStatus,
    /// Members converted into recipes
    pub processed: usize,
    /// Members skipped because conversion failed
    pub skipped: usize,
    /// Recipes written to the database
    pub saved: usize,
}

impl LoadOutcome {
    fn nothing(status: LoadStatus) -> Self {
        Self {
            status,
            processed: 0,
            skipped: 0,
            saved: 0,
        }
    }
}

/// Bulk loader for the recipe document
#[derive(Debug, Clone, Default)]
pub struct Loader {
    config: LoaderConfig,
}

impl Loader {
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load the document into an empty store; do nothing otherwise
    pub fn load_if_needed(&self, conn: &mut Connection) -> Result<LoadOutcome> {
        if !self.config.enabled {
            info!("Data loading is disabled via configuration");
            return Ok(LoadOutcome::nothing(LoadStatus::Disabled));
        }

        let existing = Recipe::count(conn)?;
        if existing > 0 {
            info!("Data already loaded, skipping. Current count: {}", existing);
            return Ok(LoadOutcome::nothing(LoadStatus::AlreadyLoaded));
        }

        let reader = match self.config.source.open()? {
            Some(reader) => reader,
            None => {
                warn!("Data file not found: {}", self.config.source);
                return Ok(LoadOutcome::nothing(LoadStatus::SourceMissing));
            }
        };

        info!("Starting data loading from {}", self.config.source);
        let mut document = parse_document(reader)?;
        info!(
            "Processing complete. Valid recipes: {}, Skipped: {}",
            document.recipes.len(),
            document.skipped
        );

        let mut outcome = LoadOutcome {
            status: LoadStatus::Empty,
            processed: document.recipes.len(),
            skipped: document.skipped,
            saved: 0,
        };

        if document.recipes.is_empty() {
            warn!("No valid recipes to save");
            return Ok(outcome);
        }

        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let existing = Recipe::count(&tx)?;
        if existing > 0 {
            info!(
                "Recipes were loaded concurrently ({} rows), discarding this batch",
                existing
            );
            outcome.status = LoadStatus::AlreadyLoaded;
            return Ok(outcome);
        }

        info!("Saving {} recipes to database", document.recipes.len());
        outcome.saved = Recipe::insert_all(&tx, &mut document.recipes)?;
        tx.commit()?;
        outcome.status = LoadStatus::Loaded;

        info!("Successfully saved {} recipes to database", outcome.saved);
        Ok(outcome)
    }
}

/// Recipes converted from one document, plus the count of skipped members
#[derive(Debug, Default)]
pub struct RecipeDocument {
    pub recipes: Vec<Recipe>,
    pub skipped: usize,
}

/// Stream a recipe document, converting each member independently
///
/// Fails only if the bytes cannot be read or are not one JSON object.
/// Bare `NaN` / `Infinity` literals are accepted and read as `null`.
pub fn parse_document<R: Read>(reader: R) -> Result<RecipeDocument> {
    let reader = BufReader::new(NonFiniteLiterals::new(reader));
    let mut de = serde_json::Deserializer::from_reader(reader);
    let document = RecipeDocument::deserialize(&mut de)?;
    de.end()?;
    Ok(document)
}

impl<'de> Deserialize<'de> for RecipeDocument {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RecipeDocumentVisitor)
    }
}

struct RecipeDocumentVisitor;

impl<'de> Visitor<'de> for RecipeDocumentVisitor {
    type Value = RecipeDocument;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a JSON object of recipe records")
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut document = RecipeDocument::default();

        while let Some((key, value)) = map.next_entry::<String, serde_json::Value>()? {
            let index = document.recipes.len() + document.skipped;
            match recipe_from_value(&value) {
                Ok(recipe) => {
                    document.recipes.push(recipe);
                    if document.recipes.len() % PROGRESS_INTERVAL == 0 {
                        debug!("Processed {} recipes so far", document.recipes.len());
                    }
                }
                Err(e) => {
                    warn!(
                        "Failed to process recipe '{}' at index {}, skipping. Error: {}",
                        key, index, e
                    );
                    document.skipped += 1;
                }
            }
        }

        debug!(
            "Parsed document with {} members",
            document.recipes.len() + document.skipped
        );
        Ok(document)
    }
}
