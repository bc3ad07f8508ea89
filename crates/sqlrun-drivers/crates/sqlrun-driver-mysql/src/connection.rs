//! MySQL session implementation

use async_trait::async_trait;
use mysql_async::prelude::Queryable;
use mysql_async::{Conn, Opts};
use sqlrun_core::{Result, Session, SqlrunError, StatementResult};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

/// MySQL session wrapper holding a single connection
pub struct MySqlSession {
    conn: Mutex<Option<Conn>>,
    closed: AtomicBool,
}

impl MySqlSession {
    /// Connect to a MySQL database
    pub async fn connect(opts: Opts) -> Result<Self> {
        tracing::info!(host = %opts.ip_or_hostname(), port = opts.tcp_port(), "connecting to MySQL database");

        let conn = Conn::new(opts)
            .await
            .map_err(|e| SqlrunError::Connection(format!("Failed to connect to MySQL: {}", e)))?;

        Ok(Self {
            conn: Mutex::new(Some(conn)),
            closed: AtomicBool::new(false),
        })
    }
}

#[async_trait]
impl Session for MySqlSession {
    fn driver_name(&self) -> &str {
        "mysql"
    }

    async fn execute(&self, sql: &str) -> Result<StatementResult> {
        tracing::debug!(sql_preview = %sql.chars().take(100).collect::<String>(), "executing statement");

        let mut guard = self.conn.lock().await;
        let conn = guard
            .as_mut()
            .ok_or_else(|| SqlrunError::Connection("MySQL session is closed".into()))?;

        conn.query_drop(sql)
            .await
            .map_err(|e| SqlrunError::Query(e.to_string()))?;

        let affected_rows = conn.affected_rows();
        tracing::debug!(affected_rows, "statement executed");
        Ok(StatementResult::affected(affected_rows))
    }

    async fn close(&self) -> Result<()> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        tracing::info!("closing MySQL session");
        if let Some(conn) = self.conn.lock().await.take() {
            conn.disconnect().await.map_err(|e| {
                SqlrunError::Connection(format!("Failed to close MySQL connection: {}", e))
            })?;
        }
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}
