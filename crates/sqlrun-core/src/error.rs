//! Error types for sqlrun

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for sqlrun operations
#[derive(Error, Debug)]
pub enum SqlrunError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Driver error: {0}")]
    Driver(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Failed to read script '{}': {source}", path.display())]
    Script {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Query error: {0}")]
    Query(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration file: {0}")]
    ConfigFormat(#[from] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

/// Broad classification of a [`SqlrunError`].
///
/// Only `StatementExecution` is recoverable; the execution engine captures
/// those as data and keeps going. Everything else stops the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or unsupported configuration, detected before any execution
    Configuration,
    /// Script, driver or connection could not be acquired
    ResourceAcquisition,
    /// A single statement failed at the database
    StatementExecution,
}

impl SqlrunError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SqlrunError::Configuration(_) | SqlrunError::ConfigFormat(_) => ErrorKind::Configuration,
            SqlrunError::Query(_) => ErrorKind::StatementExecution,
            SqlrunError::Driver(_)
            | SqlrunError::Connection(_)
            | SqlrunError::Script { .. }
            | SqlrunError::Io(_)
            | SqlrunError::Other(_) => ErrorKind::ResourceAcquisition,
        }
    }

    /// Whether this error must abort the whole run
    pub fn is_fatal(&self) -> bool {
        self.kind() != ErrorKind::StatementExecution
    }
}

/// Result type alias for sqlrun operations
pub type Result<T> = std::result::Result<T, SqlrunError>;
