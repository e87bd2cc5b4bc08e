// src/config.rs
//! Configuration file parsing for the recipe server
//!
//! Supports TOML configuration files with the following sections:
//! - [server] - Bind address
//! - [database] - SQLite database location
//! - [data] - Startup ingestion switch and document path
//!
//! Every key has a default, so an empty file (or no file) is valid.

use crate::loader::{DocumentSource, LoaderConfig};
use crate::server::ServerConfig;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// TOML configuration file structure
#[derive(Debug, Default, Deserialize)]
pub struct RecipesConfig {
    /// Server settings
    #[serde(default)]
    pub server: ServerSection,

    /// Database settings
    #[serde(default)]
    pub database: DatabaseSection,

    /// Ingestion settings
    #[serde(default)]
    pub data: DataSection,
}

/// Server configuration section
#[derive(Debug, Deserialize)]
pub struct ServerSection {
    /// HTTP bind address
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

/// Database configuration section
#[derive(Debug, Deserialize)]
pub struct DatabaseSection {
    /// Path to the SQLite database file
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("recipes.db")
}

/// Ingestion configuration section
#[derive(Debug, Deserialize)]
pub struct DataSection {
    /// Load the recipe document at startup when the store is empty
    #[serde(default = "default_true")]
    pub load: bool,

    /// Recipe document path (unset = bundled sample document)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for DataSection {
    fn default() -> Self {
        Self {
            load: true,
            file: None,
        }
    }
}

fn default_true() -> bool {
    true
}

impl RecipesConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: RecipesConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.bind_addr()?;

        if self.database.path.as_os_str().is_empty() {
            anyhow::bail!("database.path must not be empty");
        }

        if self
            .data
            .file
            .as_ref()
            .is_some_and(|file| file.as_os_str().is_empty())
        {
            anyhow::bail!("data.file must not be empty when set");
        }

        Ok(())
    }

    /// Parsed HTTP bind address
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.server
            .bind
            .parse()
            .with_context(|| format!("Invalid server.bind address: {}", self.server.bind))
    }

    /// Loader settings derived from the [data] section
    pub fn loader_config(&self) -> LoaderConfig {
        LoaderConfig {
            enabled: self.data.load,
            source: DocumentSource::from_config(self.data.file.clone()),
        }
    }

    /// Convert to the runtime ServerConfig structure
    pub fn to_server_config(&self) -> Result<ServerConfig> {
        Ok(ServerConfig {
            bind_addr: self.bind_addr()?,
            db_path: self.database.path.clone(),
            loader: self.loader_config(),
        })
    }
}
