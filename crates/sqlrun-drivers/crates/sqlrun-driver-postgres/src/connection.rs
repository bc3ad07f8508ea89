//! PostgreSQL session implementation

use async_trait::async_trait;
use sqlrun_core::{Result, Session, SqlrunError, StatementResult};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_postgres::{Client, NoTls, SimpleQueryMessage};

/// Format PostgreSQL errors with SQLSTATE, detail and hint
fn format_postgres_error(error: &tokio_postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut message = db_error.message().to_string();

    if let Some(detail) = db_error.detail().filter(|d| !d.trim().is_empty()) {
        message.push_str(&format!(" (detail: {})", detail));
    }
    if let Some(hint) = db_error.hint().filter(|h| !h.trim().is_empty()) {
        message.push_str(&format!(" (hint: {})", hint));
    }

    match db_error.code().code() {
        "23505" => format!("duplicate value violates unique constraint: {}", message),
        "23503" => format!("foreign key violation: {}", message),
        "23502" => format!("null value violates not-null constraint: {}", message),
        "42P01" => format!("relation does not exist: {}", message),
        "42601" => format!("syntax error: {}", message),
        code => format!("{} (SQLSTATE {})", message, code),
    }
}

/// PostgreSQL session wrapper
pub struct PostgresSession {
    client: Mutex<Option<Client>>,
    connection_task: Mutex<Option<JoinHandle<()>>>,
    closed: AtomicBool,
}

impl PostgresSession {
    /// Connect using a prepared `tokio_postgres` configuration
    pub async fn connect(config: tokio_postgres::Config) -> Result<Self> {
        let (client, connection) = config.connect(NoTls).await.map_err(|e| {
            SqlrunError::Connection(format!(
                "Failed to connect to PostgreSQL: {}",
                format_postgres_error(&e)
            ))
        })?;

        let connection_task = tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!(error = %e, "PostgreSQL connection error");
            }
        });

        Ok(Self {
            client: Mutex::new(Some(client)),
            connection_task: Mutex::new(Some(connection_task)),
            closed: AtomicBool::new(false),
        })
    }
}

#[async_trait]
impl Session for PostgresSession {
    fn driver_name(&self) -> &str {
        "postgres"
    }

    async fn execute(&self, sql: &str) -> Result<StatementResult> {
        tracing::debug!(sql_preview = %sql.chars().take(100).collect::<String>(), "executing statement");

        let guard = self.client.lock().await;
        let client = guard
            .as_ref()
            .ok_or_else(|| SqlrunError::Connection("PostgreSQL session is closed".into()))?;

        let messages = client
            .simple_query(sql)
            .await
            .map_err(|e| SqlrunError::Query(format_postgres_error(&e)))?;

        let mut affected = 0u64;
        let mut returned = 0u64;
        for message in &messages {
            match message {
                SimpleQueryMessage::CommandComplete(rows) => affected += rows,
                SimpleQueryMessage::Row(_) => returned += 1,
                _ => {}
            }
        }

        // CommandComplete also carries the row count of a SELECT
        if returned > 0 {
            Ok(StatementResult::returned(returned))
        } else {
            Ok(StatementResult::affected(affected))
        }
    }

    async fn close(&self) -> Result<()> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        // Dropping the client ends the connection future
        drop(self.client.lock().await.take());

        if let Some(task) = self.connection_task.lock().await.take() {
            task.await.map_err(|e| {
                SqlrunError::Connection(format!("PostgreSQL connection task failed: {}", e))
            })?;
        }

        tracing::debug!("PostgreSQL session closed");
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}
