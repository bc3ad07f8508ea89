//! Command-line arguments

use clap::{ArgAction, Parser, ValueEnum};
use sqlrun_core::{ConfigFile, DataSourceConfig, DataSourceSection, DriverTable, Result, SqlrunError};
use std::path::PathBuf;

/// sqlrun - run a SQL script against a database
///
/// Every statement is executed even if earlier ones fail; failures are
/// reported at the end.
#[derive(Parser, Debug)]
#[command(name = "sqlrun")]
#[command(version)]
#[command(about = "Run a SQL script statement by statement, reporting failures", long_about = None)]
#[command(after_help = "\
Usage forms:
  sqlrun <DIALECT> <URL> <USERNAME> <PASSWORD> <SCRIPT>
  sqlrun <CONFIG.toml> [SCRIPT]
  sqlrun --config <CONFIG.toml> [SCRIPT]

Example configuration:
  [datasource]
  dialect = \"mysql\"
  url = \"jdbc:mysql://localhost:3306/mydb?useSSL=false\"
  username = \"root\"
  password = \"password\"
  driver = \"com.mysql.cj.jdbc.Driver\"
  scriptPath = \"./script.sql\"")]
pub struct Cli {
    /// Either the five connection values or a configuration file and optional script.
    ///
    /// Values may start with `-` (a password often does), so options go
    /// before them.
    #[arg(value_name = "ARGS", num_args = 0..=5, allow_hyphen_values = true)]
    pub args: Vec<String>,

    /// Configuration file path
    #[arg(short = 'c', long = "config", env = "SQLRUN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Statement delimiter (default: ";")
    #[arg(short = 'd', long = "delimiter")]
    pub delimiter: Option<String>,

    /// Output format for the run summary
    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Split the script and list the statements without connecting
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Also write JSON logs, to DIR (`--log-dir=DIR`) or to the platform data directory
    #[arg(long = "log-dir", value_name = "DIR", num_args = 0..=1, require_equals = true)]
    pub log_dir: Option<Option<PathBuf>>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Where the run configuration comes from
#[derive(Debug, Clone, PartialEq)]
pub enum Invocation {
    Positional {
        dialect: String,
        url: String,
        username: String,
        password: String,
        script: PathBuf,
    },
    ConfigFile {
        path: PathBuf,
        script: Option<PathBuf>,
    },
}

impl Cli {
    /// Work out which usage form was given
    pub fn invocation(&self) -> Result<Invocation> {
        if let Some(path) = &self.config {
            return match self.args.as_slice() {
                [] => Ok(Invocation::ConfigFile {
                    path: path.clone(),
                    script: None,
                }),
                [script] => Ok(Invocation::ConfigFile {
                    path: path.clone(),
                    script: Some(PathBuf::from(script)),
                }),
                other => Err(usage_error(other.len())),
            };
        }

        match self.args.as_slice() {
            [dialect, url, username, password, script] => Ok(Invocation::Positional {
                dialect: dialect.clone(),
                url: url.clone(),
                username: username.clone(),
                password: password.clone(),
                script: PathBuf::from(script),
            }),
            [path] => Ok(Invocation::ConfigFile {
                path: PathBuf::from(path),
                script: None,
            }),
            [path, script] => Ok(Invocation::ConfigFile {
                path: PathBuf::from(path),
                script: Some(PathBuf::from(script)),
            }),
            other => Err(usage_error(other.len())),
        }
    }

    /// Resolve and validate the run configuration.
    ///
    /// Returns the driver table alongside, since a configuration file may
    /// extend it.
    pub fn resolve(&self) -> Result<(DataSourceConfig, DriverTable)> {
        let (section, table) = match self.invocation()? {
            Invocation::Positional {
                dialect,
                url,
                username,
                password,
                script,
            } => {
                tracing::info!("loading configuration from command-line arguments");
                (
                    DataSourceSection::from_args(&dialect, &url, &username, &password, script),
                    DriverTable::default(),
                )
            }
            Invocation::ConfigFile { path, script } => {
                let file = ConfigFile::load(&path)?;
                let mut section = file.datasource()?;
                if let Some(script) = script {
                    section = section.with_script_path(script);
                }
                (section, file.driver_table())
            }
        };

        let section = match &self.delimiter {
            Some(delimiter) => section.with_delimiter(delimiter.clone()),
            None => section,
        };

        let config = section.resolve(&table)?;
        Ok((config, table))
    }
}

fn usage_error(count: usize) -> SqlrunError {
    SqlrunError::Configuration(format!(
        "Expected <DIALECT> <URL> <USERNAME> <PASSWORD> <SCRIPT> or <CONFIG> [SCRIPT], got {} argument(s)",
        count
    ))
}
