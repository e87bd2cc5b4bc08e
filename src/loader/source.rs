// src/loader/source.rs

//! Where the recipe document comes from
//!
//! The document is either the sample compiled into the binary or a file on
//! disk. A missing file is reported as `None` rather than an error so the
//! loader can treat it as "nothing to load".

use crate::error::Result;
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;

/// Sample document shipped with the crate
pub const BUNDLED_DOCUMENT: &str = include_str!("../../data/sample_recipes.json");

/// A byte stream yielding one JSON object of recipe records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DocumentSource {
    /// The sample document compiled into the binary
    #[default]
    Bundled,
    /// A document on the local filesystem
    File(PathBuf),
}

impl DocumentSource {
    /// Pick the configured file, falling back to the bundled sample
    pub fn from_config(file: Option<PathBuf>) -> Self {
        match file {
            Some(path) => DocumentSource::File(path),
            None => DocumentSource::Bundled,
        }
    }

    /// Open the document for reading
    ///
    /// Returns `Ok(None)` when the file does not exist; any other failure to
    /// open it is an error.
    pub fn open(&self) -> Result<Option<Box<dyn Read + Send>>> {
        match self {
            DocumentSource::Bundled => Ok(Some(Box::new(BUNDLED_DOCUMENT.as_bytes()))),
            DocumentSource::File(path) => match File::open(path) {
                Ok(file) => Ok(Some(Box::new(file))),
                Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
                Err(e) => Err(e.into()),
            },
        }
    }
}

impl fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentSource::Bundled => write!(f, "bundled sample document"),
            DocumentSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}
