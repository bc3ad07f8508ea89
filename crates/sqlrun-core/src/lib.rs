//! sqlrun Core - Core abstractions for the SQL script executor
//!
//! This crate provides the fundamental traits and types that all other
//! sqlrun crates depend on. It defines:
//!
//! - `DatabaseDriver` - Trait for database driver implementations
//! - `Session` - Trait for an open database session
//! - `DriverTable` - Explicit dialect to driver mapping
//! - `DataSourceConfig` - Resolved configuration for a single run

pub mod config;
mod dialect;
mod driver;
mod error;
mod session;

pub use config::{ConfigFile, DEFAULT_DELIMITER, DataSourceConfig, DataSourceSection, Secret};
pub use dialect::*;
pub use driver::*;
pub use error::*;
pub use session::*;
