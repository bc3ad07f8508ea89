//! Database driver trait definition

use crate::{Result, Session, SqlrunError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// Core driver trait that all database drivers must implement
#[async_trait]
pub trait DatabaseDriver: Send + Sync {
    /// Unique identifier for this driver (e.g., "postgres", "mysql", "sqlite")
    fn name(&self) -> &'static str;

    /// Human-readable name (e.g., "PostgreSQL", "MySQL", "SQLite")
    fn display_name(&self) -> &'static str {
        self.name()
    }

    /// Alternative identifiers this driver answers to in configuration files.
    ///
    /// Lets configurations written for JDBC-based tools (which name a driver
    /// class such as `org.postgresql.Driver`) resolve to a native driver.
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    /// Default connection port (None for file-based databases like SQLite)
    fn default_port(&self) -> Option<u16> {
        None
    }

    /// Open a new session
    async fn connect(&self, config: &ConnectionConfig) -> Result<Arc<dyn Session>>;
}

/// Connection target parsed from a connection URL
#[derive(Clone, Default)]
pub struct ConnectionConfig {
    /// URL scheme with any `jdbc:` prefix removed (e.g., "postgresql", "mysql", "sqlite")
    pub scheme: String,
    /// Host address (empty for file-based databases)
    pub host: String,
    /// Port number, if the URL carried one
    pub port: Option<u16>,
    /// Database name or file path
    pub database: Option<String>,
    /// Username
    pub username: Option<String>,
    /// Password
    pub password: Option<String>,
    /// Query-string parameters from the URL
    pub params: HashMap<String, String>,
}

impl ConnectionConfig {
    /// Parse a connection URL, applying explicit credentials on top.
    ///
    /// Accepted forms:
    /// - `postgresql://host:5432/db`, `postgres://...`, `mysql://host:3306/db?...`
    /// - the same prefixed with `jdbc:`
    /// - `sqlite:path/to/file.db`, `sqlite:///abs/path.db`, `sqlite::memory:`
    pub fn from_url(url: &str, username: Option<&str>, password: Option<&str>) -> Result<Self> {
        let trimmed = url.trim();
        let without_jdbc = strip_prefix_ignore_case(trimmed, "jdbc:").unwrap_or(trimmed);

        let mut config = if let Some(rest) = strip_prefix_ignore_case(without_jdbc, "sqlite:") {
            let path = rest.strip_prefix("//").unwrap_or(rest);
            let database = if path.is_empty() { ":memory:" } else { path };
            Self {
                scheme: "sqlite".to_string(),
                database: Some(database.to_string()),
                ..Self::default()
            }
        } else {
            Self::parse_network_url(without_jdbc)?
        };

        if let Some(user) = username.filter(|u| !u.is_empty()) {
            config.username = Some(user.to_string());
        }
        if let Some(pass) = password {
            config.password = Some(pass.to_string());
        }

        Ok(config)
    }

    fn parse_network_url(raw: &str) -> Result<Self> {
        let parsed = url::Url::parse(raw)
            .map_err(|e| SqlrunError::Configuration(format!("Invalid connection URL: {}", e)))?;

        let host = parsed.host_str().unwrap_or_default();
        if host.is_empty() {
            return Err(SqlrunError::Configuration(
                "Connection URL does not name a host".into(),
            ));
        }

        let database = parsed.path().trim_start_matches('/').to_string();

        Ok(Self {
            scheme: parsed.scheme().to_lowercase(),
            host: host.to_string(),
            port: parsed.port(),
            database: (!database.is_empty()).then_some(database),
            username: (!parsed.username().is_empty()).then(|| parsed.username().to_string()),
            password: parsed.password().map(str::to_string),
            params: parsed
                .query_pairs()
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect(),
        })
    }

    /// Port from the URL, or the given default
    pub fn port_or(&self, default: u16) -> u16 {
        self.port.unwrap_or(default)
    }

    /// Get a URL parameter
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

impl std::fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("scheme", &self.scheme)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "******"))
            .field("params", &self.params)
            .finish()
    }
}

fn strip_prefix_ignore_case<'a>(value: &'a str, prefix: &str) -> Option<&'a str> {
    value
        .get(..prefix.len())
        .filter(|head| head.eq_ignore_ascii_case(prefix))
        .map(|_| &value[prefix.len()..])
}

#[cfg(test)]
mod tests;
