//! sqlrun Drivers - Database driver implementations
//!
//! This crate collects the concrete drivers behind feature flags and provides
//! the [`SessionProvider`] that turns a resolved [`DataSourceConfig`] into an
//! open [`Session`].

#[cfg(feature = "mysql")]
pub use sqlrun_driver_mysql as mysql;
#[cfg(feature = "postgres")]
pub use sqlrun_driver_postgres as postgres;
#[cfg(feature = "sqlite")]
pub use sqlrun_driver_sqlite as sqlite;

mod provider;
mod registry;

pub use provider::{SessionProvider, with_session};
pub use registry::DriverRegistry;

/// Re-export commonly used types from sqlrun-core
pub use sqlrun_core::{
    ConnectionConfig, DataSourceConfig, DatabaseDriver, DriverTable, Result, Session, SqlrunError,
    StatementResult,
};
