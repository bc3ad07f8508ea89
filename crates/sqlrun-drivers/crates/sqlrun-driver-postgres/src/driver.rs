//! PostgreSQL driver implementation

use async_trait::async_trait;
use sqlrun_core::{ConnectionConfig, DatabaseDriver, Result, Session, SqlrunError};
use std::sync::Arc;
use std::time::Duration;
use tokio_postgres::config::SslMode;

use crate::PostgresSession;

const DEFAULT_PORT: u16 = 5432;

/// PostgreSQL database driver
pub struct PostgresDriver;

impl PostgresDriver {
    /// Create a new PostgreSQL driver instance
    pub fn new() -> Self {
        tracing::debug!("PostgreSQL driver initialized");
        Self
    }
}

impl Default for PostgresDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DatabaseDriver for PostgresDriver {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn display_name(&self) -> &'static str {
        "PostgreSQL"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["postgresql", "pgsql", "org.postgresql.Driver"]
    }

    fn default_port(&self) -> Option<u16> {
        Some(DEFAULT_PORT)
    }

    #[tracing::instrument(skip(self, config), fields(host = %config.host, database = config.database.as_deref()))]
    async fn connect(&self, config: &ConnectionConfig) -> Result<Arc<dyn Session>> {
        let pg_config = build_config(config)?;
        let session = PostgresSession::connect(pg_config).await.map_err(|e| {
            tracing::error!(error = %e, "failed to connect to PostgreSQL database");
            e
        })?;

        tracing::info!(
            host = %config.host,
            port = config.port_or(DEFAULT_PORT),
            "PostgreSQL session created"
        );
        Ok(Arc::new(session))
    }
}

/// Translate a parsed connection URL into a `tokio_postgres` configuration.
///
/// Recognised URL parameters: `sslmode`, `connectTimeout`/`connect_timeout`
/// (seconds) and `applicationName`/`application_name`.
pub(crate) fn build_config(config: &ConnectionConfig) -> Result<tokio_postgres::Config> {
    let mut pg = tokio_postgres::Config::new();
    pg.host(&config.host)
        .port(config.port_or(DEFAULT_PORT))
        .dbname(config.database.as_deref().unwrap_or("postgres"))
        .application_name(
            config
                .param("applicationName")
                .or_else(|| config.param("application_name"))
                .unwrap_or("sqlrun"),
        );

    if let Some(user) = &config.username {
        pg.user(user);
    }
    if let Some(password) = &config.password {
        pg.password(password);
    }

    // Sessions are plain TCP, so modes that demand TLS fail at connect time
    let ssl_mode = match config.param("sslmode").map(str::to_lowercase).as_deref() {
        None | Some("disable") | Some("allow") | Some("prefer") => SslMode::Disable,
        Some("require") | Some("verify-ca") | Some("verify-full") => SslMode::Require,
        Some(other) => {
            return Err(SqlrunError::Configuration(format!(
                "Unknown PostgreSQL sslmode '{}'",
                other
            )));
        }
    };
    pg.ssl_mode(ssl_mode);

    if let Some(raw) = config
        .param("connectTimeout")
        .or_else(|| config.param("connect_timeout"))
    {
        let seconds: u64 = raw.parse().map_err(|_| {
            SqlrunError::Configuration(format!("Invalid connect timeout '{}'", raw))
        })?;
        pg.connect_timeout(Duration::from_secs(seconds));
    }

    Ok(pg)
}
