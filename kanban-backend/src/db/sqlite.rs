//! SQLite storage handle
//!
//! Owns an r2d2 pool of SQLite connections. Opened once at startup and shared
//! by every request handler through `AppState`.

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

pub type DbConn = PooledConnection<SqliteConnectionManager>;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS notes (
    id TEXT PRIMARY KEY NOT NULL,
    note_type TEXT NOT NULL DEFAULT 'ideas' CHECK (length(trim(note_type)) > 0),
    text TEXT NOT NULL CHECK (length(trim(text)) > 0)
);
CREATE INDEX IF NOT EXISTS idx_notes_type_text ON notes (note_type, text);
";

#[derive(Debug, Error)]
pub enum DbError {
    #[error("{0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub struct Database {
    pool: Pool<SqliteConnectionManager>,
}

impl Database {
    /// Open (or create) the database file and make sure the schema exists.
    pub fn new(database_url: &str, pool_size: u32) -> Result<Self, DbError> {
        if let Some(parent) = Path::new(database_url).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let manager = SqliteConnectionManager::file(database_url).with_init(|conn| {
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |_| Ok(()))?;
            conn.busy_timeout(BUSY_TIMEOUT)
        });
        let pool = Pool::builder().max_size(pool_size.max(1)).build(manager)?;

        let db = Self { pool };
        db.init_schema()?;

        log::info!("[DB] Opened {} (pool size {})", database_url, pool_size.max(1));
        Ok(db)
    }

    fn init_schema(&self) -> Result<(), DbError> {
        let conn = self.conn()?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Check out a pooled connection
    pub fn conn(&self) -> Result<DbConn, DbError> {
        Ok(self.pool.get()?)
    }

    /// Round-trip a trivial query to prove the storage engine is reachable
    pub fn ping(&self) -> Result<(), DbError> {
        let conn = self.conn()?;
        conn.query_row("SELECT 1", [], |_| Ok(()))?;
        Ok(())
    }
}
