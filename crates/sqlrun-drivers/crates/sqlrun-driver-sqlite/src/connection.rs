//! SQLite session implementation

use async_trait::async_trait;
use parking_lot::Mutex;
use rusqlite::{Connection as RusqliteConnection, OpenFlags};
use sqlrun_core::{Result, Session, SqlrunError, StatementResult};
use std::path::{Path, PathBuf};

/// SQLite session wrapper
pub struct SqliteSession {
    conn: Mutex<Option<RusqliteConnection>>,
}

impl SqliteSession {
    /// Open a SQLite database file, or an in-memory database for `:memory:`
    pub fn open(path: &str) -> Result<Self> {
        tracing::info!(path = %path, "opening SQLite database");

        let conn = if path == ":memory:" {
            RusqliteConnection::open_in_memory().map_err(|e| {
                SqlrunError::Connection(format!("Failed to open in-memory database: {}", e))
            })?
        } else {
            let expanded = expand_path(path)?;
            if let Some(parent) = expanded.parent()
                && !parent.as_os_str().is_empty()
                && !parent.exists()
            {
                return Err(SqlrunError::Connection(format!(
                    "Parent directory does not exist: {}",
                    parent.display()
                )));
            }

            let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX;
            RusqliteConnection::open_with_flags(&expanded, flags).map_err(|e| {
                SqlrunError::Connection(format!(
                    "Failed to open SQLite database at '{}': {}",
                    expanded.display(),
                    e
                ))
            })?
        };

        conn.pragma_update(None, "foreign_keys", "ON")
            .map_err(|e| SqlrunError::Connection(format!("Failed to enable foreign keys: {}", e)))?;

        Ok(Self {
            conn: Mutex::new(Some(conn)),
        })
    }
}

/// Expand a leading `~/` to the home directory
fn expand_path(path: &str) -> Result<PathBuf> {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .ok_or_else(|| {
                SqlrunError::Configuration("Cannot expand '~': home directory is unknown".into())
            }),
        None => Ok(Path::new(path).to_path_buf()),
    }
}

fn query_error(e: rusqlite::Error) -> SqlrunError {
    SqlrunError::Query(e.to_string())
}

#[async_trait]
impl Session for SqliteSession {
    fn driver_name(&self) -> &str {
        "sqlite"
    }

    async fn execute(&self, sql: &str) -> Result<StatementResult> {
        tracing::debug!(sql_preview = %sql.chars().take(100).collect::<String>(), "executing statement");

        let guard = self.conn.lock();
        let conn = guard
            .as_ref()
            .ok_or_else(|| SqlrunError::Connection("SQLite session is closed".into()))?;

        let mut stmt = conn.prepare(sql).map_err(query_error)?;

        // Statements with a result set are stepped through and their rows dropped
        if stmt.column_count() > 0 {
            let mut rows = stmt.query([]).map_err(query_error)?;
            let mut returned = 0u64;
            while rows.next().map_err(query_error)?.is_some() {
                returned += 1;
            }
            Ok(StatementResult::returned(returned))
        } else {
            let affected = stmt.execute([]).map_err(query_error)?;
            Ok(StatementResult::affected(affected as u64))
        }
    }

    async fn close(&self) -> Result<()> {
        let Some(conn) = self.conn.lock().take() else {
            return Ok(());
        };

        tracing::info!("closing SQLite session");
        conn.close().map_err(|(_, e)| {
            SqlrunError::Connection(format!("Failed to close SQLite database: {}", e))
        })
    }

    fn is_closed(&self) -> bool {
        self.conn.lock().is_none()
    }
}
