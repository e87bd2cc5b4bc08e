// src/db/mod.rs

//! SQLite storage for recipe records
//!
//! All recipe state lives in one SQLite database. Connections are opened on
//! demand (one per request or per load) rather than shared, so callers pass
//! a `&Connection` explicitly into every model and query function.
//!
//! Every connection from `open` carries the `lower_unicode(text)` SQL
//! function, a full Unicode lowercase that SQLite's built-in `lower()` and
//! `LIKE` (ASCII only) do not provide.

pub mod models;
pub mod predicate;
pub mod schema;

use crate::error::{Error, Result};
use rusqlite::Connection;
use rusqlite::functions::FunctionFlags;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// How long a connection waits on a locked database before failing
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Name of the Unicode-aware lowercase SQL function
pub const LOWER_UNICODE: &str = "lower_unicode";

/// Create the database file (if needed) and bring the schema up to date
pub fn init<P: AsRef<Path>>(db_path: P) -> Result<()> {
    let db_path = db_path.as_ref();
    info!("Initializing database at {}", db_path.display());

    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            Error::Init(format!(
                "Failed to create database directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let conn = open(db_path)?;
    schema::migrate(&conn)?;
    Ok(())
}

/// Open a connection with the pragmas every caller relies on
pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Connection> {
    let db_path = db_path.as_ref();
    debug!("Opening database {}", db_path.display());

    let conn = Connection::open(db_path)?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "foreign_keys", "ON")?;
    register_functions(&conn)?;
    Ok(conn)
}

/// Install the custom SQL functions queries rely on
fn register_functions(conn: &Connection) -> Result<()> {
    conn.create_scalar_function(
        LOWER_UNICODE,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let text: Option<String> = ctx.get(0)?;
            Ok(text.map(|t| t.to_lowercase()))
        },
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_parent_directory() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("nested/dir/recipes.db");

        init(&db_path).unwrap();

        assert!(db_path.exists());
        let conn = open(&db_path).unwrap();
        assert_eq!(schema::get_schema_version(&conn).unwrap(), schema::SCHEMA_VERSION);
    }

    #[test]
    fn test_lower_unicode_function() {
        let temp_dir = TempDir::new().unwrap();
        let conn = open(temp_dir.path().join("recipes.db")).unwrap();

        let lowered: String = conn
            .query_row("SELECT lower_unicode('CRÈME BRÛLÉE')", [], |row| row.get(0))
            .unwrap();
        assert_eq!(lowered, "crème brûlée");

        let null: Option<String> = conn
            .query_row("SELECT lower_unicode(NULL)", [], |row| row.get(0))
            .unwrap();
        assert!(null.is_none());
    }
}
