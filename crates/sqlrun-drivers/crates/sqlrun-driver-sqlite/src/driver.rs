//! SQLite driver implementation

use async_trait::async_trait;
use sqlrun_core::{ConnectionConfig, DatabaseDriver, Result, Session};
use std::sync::Arc;

use crate::SqliteSession;

/// SQLite database driver
pub struct SqliteDriver;

impl SqliteDriver {
    /// Create a new SQLite driver instance
    pub fn new() -> Self {
        tracing::debug!("SQLite driver initialized");
        Self
    }
}

impl Default for SqliteDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DatabaseDriver for SqliteDriver {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn display_name(&self) -> &'static str {
        "SQLite"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["sqlite3", "org.sqlite.JDBC"]
    }

    #[tracing::instrument(skip(self, config), fields(database = config.database.as_deref()))]
    async fn connect(&self, config: &ConnectionConfig) -> Result<Arc<dyn Session>> {
        let path = config.database.as_deref().unwrap_or(":memory:");
        let session = SqliteSession::open(path).map_err(|e| {
            tracing::error!(error = %e, "failed to open SQLite database");
            e
        })?;
        Ok(Arc::new(session))
    }
}
