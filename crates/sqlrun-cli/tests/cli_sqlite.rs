//! End-to-end runs of the `sqlrun` binary against SQLite databases

use indoc::indoc;
use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const SEED_SCRIPT: &str = indoc! {"
    -- seed data
    CREATE TABLE t (id INTEGER PRIMARY KEY);
    INSERT INTO t VALUES (1);
    INSERT INTO t VALUES (2)
    ;
    BAD SYNTAX HERE
    SELECT 1;
    INSERT INTO t VALUES (3);
"};

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn db_url(&self) -> String {
        format!("sqlite:{}", self.path("app.db").display())
    }

    fn row_ids(&self) -> Vec<i64> {
        let conn = rusqlite::Connection::open(self.path("app.db")).unwrap();
        let mut stmt = conn.prepare("SELECT id FROM t ORDER BY id").unwrap();
        stmt.query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<Vec<i64>, _>>()
            .unwrap()
    }
}

fn sqlrun(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sqlrun"))
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("SQLRUN_CONFIG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[test]
fn test_positional_run_continues_past_failures() {
    let fixture = Fixture::new();
    let script = path_arg(&fixture.write("seed.sql", SEED_SCRIPT));
    let url = fixture.db_url();

    let output = sqlrun(&["sqlite", &url, "local", "", &script]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Total: 5, Successful: 4, Failed: 1"));
    assert!(stderr(&output).contains("BAD SYNTAX HERE"));

    // The statement after the failure still ran
    assert_eq!(fixture.row_ids(), vec![1, 2, 3]);
}

#[test]
fn test_config_file_run_with_json_output() {
    let fixture = Fixture::new();
    let script = fixture.write("seed.sql", SEED_SCRIPT);
    let config = fixture.write(
        "sqlrun.toml",
        &format!(
            "[datasource]\ndialect = \"sqlite\"\nurl = \"{}\"\nusername = \"local\"\nscriptPath = \"{}\"\n",
            fixture.db_url(),
            script.display()
        ),
    );

    let output = sqlrun(&["--format", "json", &path_arg(&config)]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(report["total"], 5);
    assert_eq!(report["succeeded"], 4);
    assert_eq!(report["failed"], 1);
    assert_eq!(report["failures"][0]["position"], 4);
    assert_eq!(report["failures"][0]["sql"], "BAD SYNTAX HERE\nSELECT 1");
}

#[test]
fn test_script_argument_overrides_config_file() {
    let fixture = Fixture::new();
    let other = fixture.write("other.sql", "CREATE TABLE t (id INTEGER);\nINSERT INTO t VALUES (42);\n");
    let config = fixture.write(
        "sqlrun.toml",
        &format!(
            "[datasource]\ndialect = \"sqlite\"\nurl = \"{}\"\nusername = \"local\"\nscriptPath = \"missing.sql\"\n",
            fixture.db_url()
        ),
    );

    let output = sqlrun(&["--config", &path_arg(&config), &path_arg(&other)]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(fixture.row_ids(), vec![42]);
}

#[test]
fn test_dry_run_does_not_touch_the_database() {
    let fixture = Fixture::new();
    let script = path_arg(&fixture.write("seed.sql", SEED_SCRIPT));
    let url = fixture.db_url();

    let output = sqlrun(&["--dry-run", "--format", "json", "sqlite", &url, "local", "", &script]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let listing: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(listing.as_array().map(Vec::len), Some(5));
    assert_eq!(listing[0]["sql"], "CREATE TABLE t (id INTEGER PRIMARY KEY)");
    assert!(!fixture.path("app.db").exists());
}

#[test]
fn test_custom_delimiter() {
    let fixture = Fixture::new();
    let script = path_arg(&fixture.write(
        "seed.sql",
        "CREATE TABLE t (id INTEGER)$$\nINSERT INTO t VALUES (7)$$\n",
    ));
    let url = fixture.db_url();

    let output = sqlrun(&["--delimiter", "$$", "sqlite", &url, "local", "", &script]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(fixture.row_ids(), vec![7]);
}

#[test]
fn test_unsupported_dialect_exits_with_configuration_status() {
    let fixture = Fixture::new();
    let script = path_arg(&fixture.write("seed.sql", SEED_SCRIPT));

    let output = sqlrun(&["oracle", "jdbc:oracle:thin:@localhost:1521:xe", "u", "p", &script]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Unsupported dialect 'oracle'"));
}

#[test]
fn test_missing_script_exits_non_zero_without_connecting() {
    let fixture = Fixture::new();
    let missing = path_arg(&fixture.path("missing.sql"));
    let url = fixture.db_url();

    let output = sqlrun(&["sqlite", &url, "local", "", &missing]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Failed to read script"));
    assert!(!fixture.path("app.db").exists());
}

#[test]
fn test_unreachable_database_exits_non_zero() {
    let fixture = Fixture::new();
    let script = path_arg(&fixture.write("seed.sql", SEED_SCRIPT));
    let url = format!("sqlite:{}", fixture.path("no/such/dir/app.db").display());

    let output = sqlrun(&["sqlite", &url, "local", "", &script]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("could not open a sqlite session"));
}

#[test]
fn test_wrong_argument_count_exits_with_configuration_status() {
    let output = sqlrun(&["a", "b", "c"]);
    assert_eq!(output.status.code(), Some(2));
}
