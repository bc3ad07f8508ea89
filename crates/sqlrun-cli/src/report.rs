//! Run report rendering

use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use serde::Serialize;
use sqlrun_script::ExecutionResult;

/// Longest SQL excerpt shown in the failure table
const MAX_SQL_WIDTH: usize = 200;

/// One-line tally of a run
pub fn summary_line(result: &ExecutionResult) -> String {
    format!(
        "Execution complete - Total: {}, Successful: {}, Failed: {} ({} ms)",
        result.total,
        result.succeeded,
        result.failed,
        result.elapsed.as_millis()
    )
}

/// Table of failed statements, or `None` when nothing failed
pub fn failure_table(result: &ExecutionResult) -> Option<String> {
    if result.failures.is_empty() {
        return None;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Error", "Failed SQL"]);

    for failure in &result.failures {
        table.add_row(vec![
            failure.position.to_string(),
            failure.message.clone(),
            excerpt(&failure.sql),
        ]);
    }

    Some(table.to_string())
}

/// Result as pretty-printed JSON
pub fn json_report(result: &ExecutionResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}

#[derive(Serialize)]
struct PlannedStatement<'a> {
    position: usize,
    sql: &'a str,
}

/// Statement listing for `--dry-run`
pub fn statement_listing(statements: &[String]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Statement"]);
    for (index, sql) in statements.iter().enumerate() {
        table.add_row(vec![(index + 1).to_string(), sql.clone()]);
    }
    format!("{}\n{} statement(s)", table, statements.len())
}

/// Statement listing for `--dry-run --format json`
pub fn statement_listing_json(statements: &[String]) -> serde_json::Result<String> {
    let planned: Vec<PlannedStatement<'_>> = statements
        .iter()
        .enumerate()
        .map(|(index, sql)| PlannedStatement {
            position: index + 1,
            sql,
        })
        .collect();
    serde_json::to_string_pretty(&planned)
}

fn excerpt(sql: &str) -> String {
    if sql.chars().count() <= MAX_SQL_WIDTH {
        return sql.to_string();
    }
    let mut short: String = sql.chars().take(MAX_SQL_WIDTH).collect();
    short.push('…');
    short
}
