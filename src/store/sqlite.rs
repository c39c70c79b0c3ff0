use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags, Row};
use tracing::debug;

use super::{BookStore, StoreResult};
use crate::models::Book;

/// Local stand-in for the hosted table: a SQLite file holding a `Books` table
/// with the same columns. A connection is opened per fetch so the store can be
/// shared across fetch threads without locking.
pub struct SqliteStore {
    path: PathBuf,
    table: String,
}

impl SqliteStore {
    /// Point the store at `path`, creating the file and table when missing.
    pub fn open(path: impl Into<PathBuf>, table: &str) -> StoreResult<Self> {
        let store = Self {
            path: path.into(),
            table: table.to_string(),
        };
        if let Some(parent) = store.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(&store.path)?;
        ensure_schema(&conn, &store.table)?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Create the books table if it does not exist yet.
pub fn ensure_schema(conn: &Connection, table: &str) -> rusqlite::Result<()> {
    conn.execute(
        &format!(
            "CREATE TABLE IF NOT EXISTS \"{}\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                title TEXT,
                author TEXT,
                category TEXT,
                status TEXT,
                issued_to TEXT,
                issued_on TEXT
            )",
            quote_ident(table)
        ),
        [],
    )?;
    Ok(())
}

impl BookStore for SqliteStore {
    fn fetch_all(&self) -> StoreResult<Vec<Book>> {
        debug!(path = %self.path.display(), "querying sqlite store");
        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        let mut stmt = conn.prepare(&format!(
            "SELECT id, created_at, title, author, category, status, issued_to, issued_on
             FROM \"{}\"",
            quote_ident(&self.table)
        ))?;

        let books = stmt
            .query_map([], book_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(books)
    }

    fn describe(&self) -> String {
        format!("sqlite:{}#{}", self.path.display(), self.table)
    }
}

fn book_from_row(row: &Row<'_>) -> rusqlite::Result<Book> {
    Ok(Book {
        id: row.get(0)?,
        created_at: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        title: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        author: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        category: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
        status: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
        issued_to: row.get(6)?,
        issued_on: row.get(7)?,
    })
}

/// Double any embedded quotes so the table name is safe inside `"..."`.
fn quote_ident(name: &str) -> String {
    name.replace('"', "\"\"")
}
