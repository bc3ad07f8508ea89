//! Run summary types

use serde::{Serialize, Serializer};
use std::time::Duration;

/// A statement that failed at the database
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementFailure {
    /// 1-based position of the statement in the script
    pub position: usize,
    /// The SQL that was sent
    pub sql: String,
    /// Error message reported by the driver
    pub message: String,
    /// Time spent on the failed call
    #[serde(rename = "elapsed_ms", serialize_with = "as_millis")]
    pub elapsed: Duration,
}

/// Summary of one script run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExecutionResult {
    /// Statements executed, always `succeeded + failed`
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Failures in execution order
    pub failures: Vec<StatementFailure>,
    /// Wall time for the whole run
    #[serde(rename = "elapsed_ms", serialize_with = "as_millis")]
    pub elapsed: Duration,
}

impl ExecutionResult {
    /// Check if every statement succeeded
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }

    /// Check if any statement failed
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    /// Get the failure recorded for a position, if any
    pub fn failure_at(&self, position: usize) -> Option<&StatementFailure> {
        self.failures.iter().find(|f| f.position == position)
    }
}

fn as_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
}
