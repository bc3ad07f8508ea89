//! Dialect to driver mapping

use std::collections::BTreeMap;

/// Built-in dialect to driver mappings
const DEFAULT_DRIVERS: &[(&str, &str)] = &[
    ("mysql", "mysql"),
    ("mysql5", "mysql"),
    ("mysql8", "mysql"),
    ("pgsql", "postgres"),
    ("postgres", "postgres"),
    ("postgresql", "postgres"),
    ("sqlite", "sqlite"),
];

/// Explicit mapping from dialect names to driver identifiers.
///
/// The set of keys is also the set of supported dialects. Dialect names are
/// matched case-insensitively. The table is a plain value handed to whoever
/// needs it; there is no process-wide registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverTable {
    entries: BTreeMap<String, String>,
}

impl DriverTable {
    /// Create an empty table
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Map a dialect to a driver, replacing any previous mapping
    pub fn insert(&mut self, dialect: &str, driver: &str) {
        self.entries
            .insert(dialect.trim().to_lowercase(), driver.trim().to_string());
    }

    /// Builder form of [`DriverTable::insert`]
    pub fn with(mut self, dialect: &str, driver: &str) -> Self {
        self.insert(dialect, driver);
        self
    }

    /// Add every mapping from `other`, overriding existing entries
    pub fn extend<'a>(&mut self, other: impl IntoIterator<Item = (&'a String, &'a String)>) {
        for (dialect, driver) in other {
            self.insert(dialect, driver);
        }
    }

    /// Look up the driver for a dialect
    pub fn driver_for(&self, dialect: &str) -> Option<&str> {
        self.entries
            .get(&dialect.trim().to_lowercase())
            .map(String::as_str)
    }

    /// Check if a dialect is supported
    pub fn supports(&self, dialect: &str) -> bool {
        self.driver_for(dialect).is_some()
    }

    /// List supported dialects in sorted order
    pub fn dialects(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }
}

impl Default for DriverTable {
    fn default() -> Self {
        DEFAULT_DRIVERS
            .iter()
            .fold(Self::empty(), |table, (dialect, driver)| {
                table.with(dialect, driver)
            })
    }
}
