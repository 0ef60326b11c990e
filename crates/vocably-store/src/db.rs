//! Connection bootstrap and schema evolution for the vocabulary table.
//!
//! The schema is created in full on first run. Databases written by
//! older builds lack the `context_sentences`, `synonyms` and `antonyms`
//! columns; those are added in place with an empty-string default so
//! existing rows survive. Applying the schema is idempotent.

use std::fs;
use std::path::Path;
use std::time::Duration;

use rusqlite::Connection;

use crate::StoreResult;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS vocabulary (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    word TEXT NOT NULL UNIQUE,
    definition TEXT NOT NULL,
    example TEXT,
    pronunciation TEXT,
    part_of_speech TEXT,
    context_sentences TEXT,
    synonyms TEXT,
    antonyms TEXT,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    last_reviewed TIMESTAMP,
    review_count INTEGER DEFAULT 0
)";

/// Columns added after the initial release; patched onto old tables.
const EVOLVED_COLUMNS: &[&str] = &["context_sentences", "synonyms", "antonyms"];

/// Opens the database file, creating parent directories as needed.
pub fn open_db(path: impl AsRef<Path>) -> StoreResult<Connection> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let conn = Connection::open(path)?;
    bootstrap_connection(&conn)?;
    Ok(conn)
}

/// Opens an in-memory database, for tests.
pub fn open_db_in_memory() -> StoreResult<Connection> {
    let conn = Connection::open_in_memory()?;
    bootstrap_connection(&conn)?;
    Ok(conn)
}

fn bootstrap_connection(conn: &Connection) -> StoreResult<()> {
    conn.busy_timeout(Duration::from_secs(5))?;
    apply_schema(conn)?;
    Ok(())
}

/// Creates the table if missing and adds any evolved columns an older
/// schema lacks. Safe to call repeatedly.
pub fn apply_schema(conn: &Connection) -> StoreResult<()> {
    conn.execute(CREATE_TABLE, [])?;

    for column in EVOLVED_COLUMNS {
        if !table_has_column(conn, "vocabulary", column)? {
            conn.execute(
                &format!("ALTER TABLE vocabulary ADD COLUMN {column} TEXT DEFAULT ''"),
                [],
            )?;
            tracing::info!("added column {column} to vocabulary table");
        }
    }

    Ok(())
}

pub fn table_has_column(conn: &Connection, table: &str, column: &str) -> StoreResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table})"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let name: String = row.get(1)?;
        if name == column {
            return Ok(true);
        }
    }
    Ok(false)
}
