//! Session acquisition and release

use sqlrun_core::{
    ConnectionConfig, DataSourceConfig, DatabaseDriver, DriverTable, Result, Session, SqlrunError,
};
use std::future::Future;
use std::sync::Arc;

use crate::DriverRegistry;

/// Opens sessions for resolved configurations.
///
/// Holds the available drivers and the dialect to driver table the caller
/// chose at construction time.
pub struct SessionProvider {
    registry: DriverRegistry,
    drivers: DriverTable,
}

impl SessionProvider {
    pub fn new(registry: DriverRegistry, drivers: DriverTable) -> Self {
        Self { registry, drivers }
    }

    /// Built-in drivers with the built-in dialect table
    pub fn with_defaults() -> Self {
        Self::new(DriverRegistry::with_defaults(), DriverTable::default())
    }

    /// Dialect to driver table used to resolve configurations
    pub fn driver_table(&self) -> &DriverTable {
        &self.drivers
    }

    pub fn registry(&self) -> &DriverRegistry {
        &self.registry
    }

    /// Find the driver a configuration names
    pub fn resolve_driver(&self, config: &DataSourceConfig) -> Result<Arc<dyn DatabaseDriver>> {
        if !self.drivers.supports(&config.dialect) {
            return Err(SqlrunError::Configuration(format!(
                "Unsupported dialect '{}'",
                config.dialect
            )));
        }

        self.registry.get(&config.driver).ok_or_else(|| {
            SqlrunError::Driver(format!(
                "Driver '{}' is not available (available: {})",
                config.driver,
                self.registry.list().join(", ")
            ))
        })
    }

    /// Load the driver and open an authenticated session.
    ///
    /// Fails before any statement runs if the driver is unknown or the
    /// database refuses the connection.
    #[tracing::instrument(skip_all, fields(dialect = %config.dialect, driver = %config.driver))]
    pub async fn open(&self, config: &DataSourceConfig) -> Result<Arc<dyn Session>> {
        let driver = self.resolve_driver(config)?;
        let target =
            ConnectionConfig::from_url(&config.url, Some(&config.username), config.password())?;

        tracing::info!(
            driver = driver.display_name(),
            host = %target.host,
            database = target.database.as_deref(),
            "opening database session"
        );
        let session = driver.connect(&target).await?;
        tracing::info!("database session opened");
        Ok(session)
    }
}

impl Default for SessionProvider {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Run `work` with `session`, then close the session whatever the outcome.
///
/// A failure to close is logged and does not replace the result of `work`.
pub async fn with_session<F, Fut, T>(session: Arc<dyn Session>, work: F) -> Result<T>
where
    F: FnOnce(Arc<dyn Session>) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let outcome = work(Arc::clone(&session)).await;

    match session.close().await {
        Ok(()) => tracing::info!(driver = session.driver_name(), "database session closed"),
        Err(e) => {
            tracing::warn!(error = %e, driver = session.driver_name(), "failed to close database session")
        }
    }

    outcome
}
