//! Tests for configuration resolution

use super::*;
use indoc::indoc;
use pretty_assertions::assert_eq;
use std::io::Write;

fn full_section() -> DataSourceSection {
    DataSourceSection::from_args(
        "pgsql",
        "postgresql://localhost:5432/app",
        "app",
        "secret",
        "seed.sql",
    )
}

#[test]
fn test_resolve_from_args_looks_up_driver() {
    let config = full_section().resolve(&DriverTable::default()).unwrap();

    assert_eq!(config.dialect, "pgsql");
    assert_eq!(config.driver, "postgres");
    assert_eq!(config.username, "app");
    assert_eq!(config.password(), Some("secret"));
    assert_eq!(config.script_path, PathBuf::from("seed.sql"));
    assert_eq!(config.delimiter, DEFAULT_DELIMITER);
}

#[test]
fn test_dialect_is_lowercased() {
    let mut section = full_section();
    section.dialect = Some("MySQL".into());
    let config = section.resolve(&DriverTable::default()).unwrap();
    assert_eq!(config.dialect, "mysql");
    assert_eq!(config.driver, "mysql");
}

#[test]
fn test_unsupported_dialect_is_rejected() {
    let mut section = full_section();
    section.dialect = Some("oracle".into());
    let err = section.resolve(&DriverTable::default()).unwrap_err();

    assert!(matches!(err, SqlrunError::Configuration(_)));
    assert!(err.to_string().contains("Unsupported dialect 'oracle'"));
}

#[test]
fn test_missing_required_fields() {
    let table = DriverTable::default();
    let cases: Vec<(&str, fn(&mut DataSourceSection))> = vec![
        ("dialect", |s| s.dialect = None),
        ("url", |s| s.url = Some("  ".into())),
        ("username", |s| s.username = None),
        ("scriptPath", |s| s.script_path = None),
    ];

    for (field, clear) in cases {
        let mut section = full_section();
        clear(&mut section);
        let err = section.resolve(&table).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Configuration error: Missing required field '{}'", field)
        );
    }
}

#[test]
fn test_password_is_optional() {
    let mut section = full_section();
    section.password = None;
    let config = section.resolve(&DriverTable::default()).unwrap();
    assert_eq!(config.password(), None);
}

#[test]
fn test_missing_driver_when_table_has_no_entry() {
    // Supported dialect whose driver entry is blank
    let table = DriverTable::empty().with("pgsql", "");
    let err = full_section().resolve(&table).unwrap_err();
    assert!(err.to_string().contains("'driver'"));
}

#[test]
fn test_explicit_driver_wins() {
    let mut section = full_section();
    section.driver = Some("org.postgresql.Driver".into());
    let config = section.resolve(&DriverTable::default()).unwrap();
    assert_eq!(config.driver, "org.postgresql.Driver");
}

#[test]
fn test_blank_delimiter_is_rejected() {
    let err = full_section()
        .with_delimiter(" ")
        .resolve(&DriverTable::default())
        .unwrap_err();
    assert!(matches!(err, SqlrunError::Configuration(_)));
}

#[test]
fn test_delimiter_whitespace_is_trimmed() {
    let config = full_section()
        .with_delimiter(" GO\t")
        .resolve(&DriverTable::default())
        .unwrap();
    assert_eq!(config.delimiter, "GO");
}

#[test]
fn test_parse_config_file() {
    let file = ConfigFile::parse(indoc! {r#"
        [datasource]
        dialect = "mysql"
        url = "jdbc:mysql://localhost:3306/mydb?useSSL=false"
        username = "root"
        password = "password"
        driver = "com.mysql.cj.jdbc.Driver"
        scriptPath = "./script.sql"

        [drivers]
        mariadb = "mysql"
    "#})
    .unwrap();

    let table = file.driver_table();
    assert_eq!(table.driver_for("mariadb"), Some("mysql"));

    let config = file.datasource().unwrap().resolve(&table).unwrap();
    assert_eq!(config.dialect, "mysql");
    assert_eq!(config.driver, "com.mysql.cj.jdbc.Driver");
    assert_eq!(config.script_path, PathBuf::from("./script.sql"));
}

#[test]
fn test_snake_case_script_path_and_override() {
    let file = ConfigFile::parse(indoc! {r#"
        [datasource]
        dialect = "sqlite"
        url = "sqlite::memory:"
        username = "local"
        script_path = "from_file.sql"
    "#})
    .unwrap();

    let section = file.datasource().unwrap();
    assert_eq!(section.script_path, Some(PathBuf::from("from_file.sql")));

    let config = section
        .with_script_path("from_cli.sql")
        .resolve(&file.driver_table())
        .unwrap();
    assert_eq!(config.script_path, PathBuf::from("from_cli.sql"));
}

#[test]
fn test_missing_datasource_section() {
    let file = ConfigFile::parse("[drivers]\nx = \"y\"\n").unwrap();
    let err = file.datasource().unwrap_err();
    assert!(err.to_string().contains("[datasource]"));
}

#[test]
fn test_malformed_file_is_configuration_error() {
    let err = ConfigFile::parse("[datasource\ndialect = ").unwrap_err();
    assert_eq!(err.kind(), crate::ErrorKind::Configuration);
}

#[test]
fn test_load_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[datasource]\ndialect = \"pgsql\"\nurl = \"postgres://h/db\"\nusername = \"u\"\nscriptPath = \"a.sql\""
    )
    .unwrap();

    let loaded = ConfigFile::load(file.path()).unwrap();
    assert!(loaded.datasource.is_some());
}

#[test]
fn test_load_missing_file() {
    let err = ConfigFile::load(Path::new("/definitely/not/here.toml")).unwrap_err();
    assert_eq!(err.kind(), crate::ErrorKind::Configuration);
}

#[test]
fn test_debug_hides_password() {
    let config = full_section().resolve(&DriverTable::default()).unwrap();
    let debug = format!("{:?}", config);
    assert!(!debug.contains("secret"));
}
