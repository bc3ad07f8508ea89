//! sqlrun Script - splitting and running SQL scripts
//!
//! A script is turned into statements by the [`splitter`], then the
//! [`engine`] runs them one by one over a borrowed [`sqlrun_core::Session`].
//! Statement failures are collected into the [`ExecutionResult`]; they never
//! stop the run.

pub mod engine;
mod result;
pub mod splitter;

pub use engine::{Progress, ProgressObserver, RunOptions, ScriptRunner, run};
pub use result::{ExecutionResult, StatementFailure};
pub use splitter::{SplitOptions, read_script, split, split_with};
