//! SQLite-backed repository for stored spreadsheet files

use std::path::Path;
use std::sync::{Mutex, PoisonError};

use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;

/// A stored spreadsheet file: name plus the raw encoded bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Storage identity
    pub id: i64,
    /// Upload name, the lookup key
    pub file_name: String,
    /// Raw bytes of the encoded spreadsheet
    pub content: Vec<u8>,
}

/// Listing entry: file identity and size, without the blob itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFileSummary {
    /// Storage identity
    pub id: i64,
    /// Upload name
    pub file_name: String,
    /// Blob size in bytes
    pub size: u64,
}

/// Repository over a single SQLite connection
///
/// Individual statements are atomic; nothing here coordinates across calls,
/// so concurrent writes to the same file name are last-write-wins.
pub struct FileStore {
    conn: Mutex<Connection>,
}

impl FileStore {
    /// Open (or create) a store backed by a database file
    pub fn open<P: AsRef<Path>>(path: P) -> rusqlite::Result<Self> {
        Self::init(Connection::open(path)?)
    }

    /// Open a store backed by an in-memory database
    pub fn open_in_memory() -> rusqlite::Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> rusqlite::Result<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS stored_file (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                file_name TEXT NOT NULL,
                content BLOB NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_stored_file_name ON stored_file (file_name);",
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert a new file unconditionally (duplicate names are allowed)
    pub fn insert(&self, file_name: &str, content: &[u8]) -> rusqlite::Result<i64> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO stored_file (file_name, content) VALUES (?1, ?2)",
            params![file_name, content],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Look up a file by exact name
    ///
    /// No case folding, no partial match. When several rows share a name,
    /// the newest upload wins.
    pub fn find_by_name(&self, file_name: &str) -> rusqlite::Result<Option<StoredFile>> {
        self.conn()
            .query_row(
                "SELECT id, file_name, content FROM stored_file
                 WHERE file_name = ?1 ORDER BY id DESC LIMIT 1",
                params![file_name],
                |row| {
                    Ok(StoredFile {
                        id: row.get(0)?,
                        file_name: row.get(1)?,
                        content: row.get(2)?,
                    })
                },
            )
            .optional()
    }

    /// Replace a stored file's content wholesale
    pub fn update_content(&self, id: i64, content: &[u8]) -> rusqlite::Result<()> {
        self.conn().execute(
            "UPDATE stored_file SET content = ?1 WHERE id = ?2",
            params![content, id],
        )?;
        Ok(())
    }

    /// List all stored files, oldest first, without blob contents
    pub fn list(&self) -> rusqlite::Result<Vec<StoredFileSummary>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, file_name, length(content) FROM stored_file ORDER BY id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(StoredFileSummary {
                id: row.get(0)?,
                file_name: row.get(1)?,
                size: row.get::<_, i64>(2)? as u64,
            })
        })?;
        rows.collect()
    }
}
