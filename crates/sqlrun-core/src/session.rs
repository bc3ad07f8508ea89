//! Session trait

use crate::Result;
use async_trait::async_trait;

/// Outcome of a single successfully executed statement
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatementResult {
    /// Rows affected (for DML statements)
    pub affected_rows: u64,
    /// Rows returned and discarded (for statements that produce a result set)
    pub returned_rows: u64,
}

impl StatementResult {
    pub fn affected(affected_rows: u64) -> Self {
        Self {
            affected_rows,
            returned_rows: 0,
        }
    }

    pub fn returned(returned_rows: u64) -> Self {
        Self {
            affected_rows: 0,
            returned_rows,
        }
    }
}

/// An open, authenticated database session.
///
/// A session executes one SQL statement at a time. Any error returned from
/// [`Session::execute`] is a statement-level failure; the caller decides
/// whether to keep going.
#[async_trait]
pub trait Session: Send + Sync {
    /// Get the driver name (e.g., "sqlite", "postgres", "mysql")
    fn driver_name(&self) -> &str;

    /// Execute a single SQL statement, discarding any rows it returns
    async fn execute(&self, sql: &str) -> Result<StatementResult>;

    /// Close the session. Calling this more than once is a no-op.
    async fn close(&self) -> Result<()>;

    /// Check if the session is closed
    fn is_closed(&self) -> bool;
}
