//! Execution engine
//!
//! Runs statements strictly in order over a single session. A failing
//! statement is recorded and the run moves on; nothing a statement does can
//! end the run early.

use sqlrun_core::Session;
use std::time::Instant;

use crate::{ExecutionResult, StatementFailure};

/// Default number of statements between progress notifications
pub const DEFAULT_PROGRESS_INTERVAL: usize = 10;

/// Cumulative counts reported during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Statements executed so far, successful or not
    pub processed: usize,
    /// Statements that succeeded so far
    pub succeeded: usize,
}

/// Callback receiving progress notifications
pub type ProgressObserver = Box<dyn Fn(Progress) + Send + Sync>;

/// Options for a script run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Notify after every statement whose position is a multiple of this
    pub progress_interval: usize,
}

impl RunOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the progress interval, clamped to at least 1
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval.max(1);
        self
    }
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

/// Runs a split script over a borrowed session
#[derive(Default)]
pub struct ScriptRunner {
    options: RunOptions,
    observer: Option<ProgressObserver>,
}

impl ScriptRunner {
    pub fn new(options: RunOptions) -> Self {
        Self {
            options,
            observer: None,
        }
    }

    /// Register a callback for progress notifications
    pub fn with_observer(mut self, observer: impl Fn(Progress) + Send + Sync + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    /// Execute every statement in order and summarise the outcome.
    ///
    /// Statement errors are captured in the returned result. The session is
    /// only borrowed; closing it is the caller's job.
    #[tracing::instrument(skip_all, fields(statements = statements.len(), driver = session.driver_name()))]
    pub async fn run(&self, statements: &[String], session: &dyn Session) -> ExecutionResult {
        tracing::info!("starting script execution");
        let started = Instant::now();
        let interval = self.options.progress_interval.max(1);

        let mut succeeded = 0usize;
        let mut failures = Vec::new();

        for (index, sql) in statements.iter().enumerate() {
            let position = index + 1;
            if sql.trim().is_empty() {
                continue;
            }

            tracing::debug!(position, sql_preview = %sql.chars().take(100).collect::<String>(), "executing statement");
            let statement_started = Instant::now();
            match session.execute(sql).await {
                Ok(outcome) => {
                    succeeded += 1;
                    tracing::debug!(
                        position,
                        affected_rows = outcome.affected_rows,
                        returned_rows = outcome.returned_rows,
                        "statement succeeded"
                    );
                }
                Err(e) => {
                    tracing::warn!(position, error = %e, "statement failed");
                    failures.push(StatementFailure {
                        position,
                        sql: sql.clone(),
                        message: e.to_string(),
                        elapsed: statement_started.elapsed(),
                    });
                }
            }

            if position % interval == 0 {
                self.notify(Progress {
                    processed: succeeded + failures.len(),
                    succeeded,
                });
            }
        }

        let failed = failures.len();
        let result = ExecutionResult {
            total: succeeded + failed,
            succeeded,
            failed,
            failures,
            elapsed: started.elapsed(),
        };

        tracing::info!(
            total = result.total,
            succeeded = result.succeeded,
            failed = result.failed,
            elapsed_ms = result.elapsed.as_millis() as u64,
            "script execution complete"
        );
        result
    }

    fn notify(&self, progress: Progress) {
        tracing::info!(
            processed = progress.processed,
            succeeded = progress.succeeded,
            "execution progress"
        );
        if let Some(observer) = &self.observer {
            observer(progress);
        }
    }
}

/// Run statements with default options
pub async fn run(statements: &[String], session: &dyn Session) -> ExecutionResult {
    ScriptRunner::default().run(statements, session).await
}
