//! Run configuration
//!
//! A run is described by a [`DataSourceConfig`]. It is resolved either from
//! positional command-line values or from a TOML file with a `[datasource]`
//! section; both paths go through [`DataSourceSection::resolve`], which is the
//! single place where required fields and the dialect are validated.

use crate::{DriverTable, Result, SqlrunError};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Default SQL statement delimiter
pub const DEFAULT_DELIMITER: &str = ";";

/// A string that never shows up in `Debug` output
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("\"******\"")
    }
}

/// Raw, unvalidated `[datasource]` section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSourceSection {
    pub dialect: Option<String>,
    pub url: Option<String>,
    pub username: Option<String>,
    pub password: Option<Secret>,
    pub driver: Option<String>,
    #[serde(alias = "script_path")]
    pub script_path: Option<PathBuf>,
    pub delimiter: Option<String>,
}

/// Contents of a configuration file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    pub datasource: Option<DataSourceSection>,
    /// Extra dialect to driver mappings, merged over the built-in table
    #[serde(default)]
    pub drivers: BTreeMap<String, String>,
}

impl ConfigFile {
    /// Load and parse a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        tracing::info!(path = %path.display(), "loading configuration file");
        let content = std::fs::read_to_string(path).map_err(|e| {
            SqlrunError::Configuration(format!(
                "Failed to read configuration file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Take the `[datasource]` section, failing if the file has none
    pub fn datasource(&self) -> Result<DataSourceSection> {
        self.datasource.clone().ok_or_else(|| {
            SqlrunError::Configuration("Configuration file has no [datasource] section".into())
        })
    }

    /// Built-in driver table with this file's `[drivers]` entries applied
    pub fn driver_table(&self) -> DriverTable {
        let mut table = DriverTable::default();
        table.extend(&self.drivers);
        table
    }
}

impl DataSourceSection {
    /// Build a section from the five positional command-line values
    pub fn from_args(
        dialect: &str,
        url: &str,
        username: &str,
        password: &str,
        script_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            dialect: Some(dialect.to_string()),
            url: Some(url.to_string()),
            username: Some(username.to_string()),
            password: Some(Secret::new(password)),
            driver: None,
            script_path: Some(script_path.into()),
            delimiter: None,
        }
    }

    /// Override the script path
    pub fn with_script_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.script_path = Some(path.into());
        self
    }

    /// Override the statement delimiter
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = Some(delimiter.into());
        self
    }

    /// Validate the section and fill in derived values.
    ///
    /// The dialect must be a key of `table`. When no driver is named, the
    /// table's driver for the dialect is used.
    pub fn resolve(self, table: &DriverTable) -> Result<DataSourceConfig> {
        let dialect = required("dialect", self.dialect)?.to_lowercase();
        if !table.supports(&dialect) {
            return Err(SqlrunError::Configuration(format!(
                "Unsupported dialect '{}' (supported: {})",
                dialect,
                table.dialects().join(", ")
            )));
        }

        let url = required("url", self.url)?;
        let username = required("username", self.username)?;
        let script_path = self
            .script_path
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| missing("scriptPath"))?;

        let driver = match self.driver.filter(|d| !d.trim().is_empty()) {
            Some(driver) => driver.trim().to_string(),
            None => table
                .driver_for(&dialect)
                .filter(|d| !d.is_empty())
                .map(str::to_string)
                .ok_or_else(|| missing("driver"))?,
        };

        // Lines are matched after trimming, so surrounding whitespace could never match
        let delimiter = self
            .delimiter
            .map(|d| d.trim().to_string())
            .unwrap_or_else(|| DEFAULT_DELIMITER.to_string());
        if delimiter.is_empty() {
            return Err(SqlrunError::Configuration(
                "Statement delimiter must not be blank".into(),
            ));
        }

        Ok(DataSourceConfig {
            dialect,
            url,
            username,
            password: self.password,
            driver,
            script_path,
            delimiter,
        })
    }
}

fn required(field: &str, value: Option<String>) -> Result<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| missing(field))
}

fn missing(field: &str) -> SqlrunError {
    SqlrunError::Configuration(format!("Missing required field '{}'", field))
}

/// Validated configuration for one run
#[derive(Debug, Clone)]
pub struct DataSourceConfig {
    /// Lower-cased dialect name, guaranteed to be in the driver table
    pub dialect: String,
    pub url: String,
    pub username: String,
    pub password: Option<Secret>,
    /// Driver identifier, either explicit or looked up from the dialect
    pub driver: String,
    pub script_path: PathBuf,
    pub delimiter: String,
}

impl DataSourceConfig {
    pub fn password(&self) -> Option<&str> {
        self.password.as_ref().map(Secret::expose)
    }
}

#[cfg(test)]
mod tests;
