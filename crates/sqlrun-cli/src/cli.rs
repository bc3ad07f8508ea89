//! sqlrun - run a SQL script against a database
//!
//! # Usage
//!
//! ```bash
//! # Connection values on the command line
//! sqlrun pgsql postgresql://localhost:5432/app app secret ./seed.sql
//!
//! # Configuration file, optionally overriding its script
//! sqlrun ./sqlrun.toml ./other.sql
//!
//! # Show how a script would be split
//! sqlrun --dry-run ./sqlrun.toml
//! ```

use anyhow::Context;
use clap::Parser;
use sqlrun_core::{ErrorKind, SqlrunError};
use sqlrun_drivers::{DriverRegistry, SessionProvider, with_session};
use sqlrun_script::{RunOptions, ScriptRunner, read_script, split};
use std::process::ExitCode;

mod args;
mod logging;
mod report;

use args::{Cli, OutputFormat};
use logging::LoggingConfig;

/// Exit status for invalid configuration
const EXIT_CONFIGURATION: u8 = 2;
/// Exit status for a script, driver or connection that could not be acquired
const EXIT_RESOURCE: u8 = 1;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_dir = cli
        .log_dir
        .clone()
        .map(|dir| dir.unwrap_or_else(logging::log_directory));
    let _log_guard =
        match logging::init(&LoggingConfig::with_verbosity(cli.verbose).with_log_dir(log_dir)) {
            Ok(guard) => guard,
            Err(e) => {
                eprintln!("warning: failed to initialize logging: {:#}", e);
                None
            }
        };

    match execute(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "run aborted");
            eprintln!("error: {:#}", e);
            ExitCode::from(exit_status(&e))
        }
    }
}

async fn execute(cli: &Cli) -> anyhow::Result<()> {
    let (config, drivers) = cli.resolve()?;
    tracing::info!(config = ?config, "configuration resolved");

    let script = read_script(&config.script_path)?;
    let statements = split(&script, &config.delimiter);

    if cli.dry_run {
        let listing = match cli.format {
            OutputFormat::Text => report::statement_listing(&statements),
            OutputFormat::Json => report::statement_listing_json(&statements)?,
        };
        println!("{}", listing);
        return Ok(());
    }

    let provider = SessionProvider::new(DriverRegistry::with_defaults(), drivers);
    let session = provider.open(&config).await.with_context(|| {
        format!(
            "could not open a {} session for dialect '{}'",
            config.driver, config.dialect
        )
    })?;

    let mut runner = ScriptRunner::new(RunOptions::default());
    if cli.format == OutputFormat::Text {
        println!("Starting execution of {} SQL statements", statements.len());
        runner = runner.with_observer(|progress| {
            println!(
                "Executed {} statements, {} successful",
                progress.processed, progress.succeeded
            );
        });
    }

    let runner = &runner;
    let statements = &statements;
    let result = with_session(session, |session| async move {
        Ok::<_, SqlrunError>(runner.run(statements, session.as_ref()).await)
    })
    .await?;

    match cli.format {
        OutputFormat::Text => {
            if let Some(table) = report::failure_table(&result) {
                eprintln!("{}", table);
            }
            println!("{}", report::summary_line(&result));
        }
        OutputFormat::Json => println!("{}", report::json_report(&result)?),
    }

    Ok(())
}

/// Map a fatal error to the process exit status
fn exit_status(error: &anyhow::Error) -> u8 {
    match error.downcast_ref::<SqlrunError>().map(SqlrunError::kind) {
        Some(ErrorKind::Configuration) => EXIT_CONFIGURATION,
        _ => EXIT_RESOURCE,
    }
}
