//! Database opening and idempotent schema creation.

use std::path::Path;

use rusqlite::{Connection, OpenFlags};
use thiserror::Error;

use crate::entity::Entity;
use tally_model::{
    Account, AttachmentLink, Category, Payee, SplitLine, Subcategory, Transaction, TransferLink,
};

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Schema version {found} is newer than supported version {supported}")]
    VersionTooNew { supported: i32, found: i32 },
}

/// Current schema version. Increment when adding migrations.
pub const CURRENT_VERSION: i32 = 1;

/// Open or create a ledger database at the given path.
///
/// Sets WAL journaling and enables foreign keys; table creation happens
/// separately through [`ensure_schema`] so a damaged file can still be
/// opened and inspected.
pub fn open_database(path: &Path) -> Result<Connection, SchemaError> {
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

/// Open an in-memory database. Useful for testing.
pub fn open_memory() -> Result<Connection, SchemaError> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

/// Open an existing database read-only. Writes are rejected at the
/// store boundary before any I/O.
pub fn open_read_only(path: &Path) -> Result<Connection, SchemaError> {
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    Ok(conn)
}

/// Create every table and index if absent, recording the schema
/// version. Idempotent; safe to call on every startup.
///
/// Failures are logged and reported as `false` rather than propagated:
/// the application must still start so the user can inspect or repair
/// the file.
pub fn ensure_schema(conn: &Connection) -> bool {
    match try_ensure_schema(conn) {
        Ok(()) => true,
        Err(e) => {
            log::error!("schema creation failed: {e}");
            false
        }
    }
}

fn try_ensure_schema(conn: &Connection) -> Result<(), SchemaError> {
    let version = get_schema_version(conn)?;
    if version > CURRENT_VERSION {
        return Err(SchemaError::VersionTooNew {
            supported: CURRENT_VERSION,
            found: version,
        });
    }

    Account::ensure_table(conn)?;
    Payee::ensure_table(conn)?;
    Category::ensure_table(conn)?;
    Subcategory::ensure_table(conn)?;
    Transaction::ensure_table(conn)?;
    SplitLine::ensure_table(conn)?;
    AttachmentLink::ensure_table(conn)?;
    TransferLink::ensure_table(conn)?;

    if version < CURRENT_VERSION {
        set_schema_version(conn, CURRENT_VERSION)?;
    }
    Ok(())
}

/// Get the recorded schema version, or 0 if no schema exists.
fn get_schema_version(conn: &Connection) -> Result<i32, SchemaError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
        [],
        |row| row.get(0),
    )?;

    if !exists {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER NOT NULL,
                applied_at TEXT NOT NULL DEFAULT (datetime('now'))
            );",
        )?;
        return Ok(0);
    }

    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

/// Record a schema version.
fn set_schema_version(conn: &Connection, version: i32) -> Result<(), SchemaError> {
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}
