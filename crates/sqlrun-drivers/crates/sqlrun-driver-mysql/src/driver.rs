//! MySQL driver implementation

use async_trait::async_trait;
use mysql_async::{Opts, OptsBuilder};
use sqlrun_core::{ConnectionConfig, DatabaseDriver, Result, Session};
use std::sync::Arc;

use crate::MySqlSession;

const DEFAULT_PORT: u16 = 3306;

/// MySQL database driver
pub struct MySqlDriver;

impl MySqlDriver {
    /// Create a new MySQL driver instance
    pub fn new() -> Self {
        tracing::debug!("MySQL driver initialized");
        Self
    }
}

impl Default for MySqlDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DatabaseDriver for MySqlDriver {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn display_name(&self) -> &'static str {
        "MySQL"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["mariadb", "com.mysql.cj.jdbc.Driver", "com.mysql.jdbc.Driver"]
    }

    fn default_port(&self) -> Option<u16> {
        Some(DEFAULT_PORT)
    }

    #[tracing::instrument(skip(self, config), fields(host = %config.host, database = config.database.as_deref()))]
    async fn connect(&self, config: &ConnectionConfig) -> Result<Arc<dyn Session>> {
        let session = MySqlSession::connect(build_opts(config)).await.map_err(|e| {
            tracing::error!(error = %e, "failed to connect to MySQL database");
            e
        })?;

        tracing::info!(
            host = %config.host,
            port = config.port_or(DEFAULT_PORT),
            "MySQL session created"
        );
        Ok(Arc::new(session))
    }
}

/// Translate a parsed connection URL into `mysql_async` options
pub(crate) fn build_opts(config: &ConnectionConfig) -> Opts {
    let wants_tls = config
        .param("useSSL")
        .or_else(|| config.param("requireSSL"))
        .is_some_and(|v| v.eq_ignore_ascii_case("true"));
    if wants_tls {
        tracing::warn!("TLS was requested in the connection URL but sessions are plain TCP");
    }

    OptsBuilder::default()
        .ip_or_hostname(config.host.clone())
        .tcp_port(config.port_or(DEFAULT_PORT))
        .db_name(config.database.clone())
        .user(config.username.clone())
        .pass(config.password.clone())
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_opts_from_jdbc_url() {
        let config = ConnectionConfig::from_url(
            "jdbc:mysql://db.internal/mydb?useSSL=false",
            Some("root"),
            Some("password"),
        )
        .unwrap();
        let opts = build_opts(&config);

        assert_eq!(opts.ip_or_hostname(), "db.internal");
        assert_eq!(opts.tcp_port(), 3306);
        assert_eq!(opts.db_name(), Some("mydb"));
        assert_eq!(opts.user(), Some("root"));
        assert_eq!(opts.pass(), Some("password"));
    }

    #[test]
    fn test_driver_answers_to_jdbc_class_names() {
        let driver = MySqlDriver::new();
        assert_eq!(driver.name(), "mysql");
        assert!(driver.aliases().contains(&"com.mysql.cj.jdbc.Driver"));
        assert!(driver.aliases().contains(&"com.mysql.jdbc.Driver"));
    }
}
