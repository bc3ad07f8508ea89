//! Statement splitter
//!
//! Splitting is line oriented. A statement ends on a line whose trimmed text
//! ends with the delimiter; lines that are blank or start with the comment
//! marker are dropped. Delimiters inside string literals are not recognised
//! as such: every occurrence of the delimiter is removed from a finished
//! statement.

use sqlrun_core::{DEFAULT_DELIMITER, Result, SqlrunError};
use std::path::Path;

/// Default line comment marker
pub const DEFAULT_COMMENT_MARKER: &str = "--";

/// Options controlling how a script is split
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitOptions {
    /// Statement delimiter, must not be empty
    pub delimiter: String,
    /// Lines starting with this marker (after trimming) are skipped
    pub comment_marker: String,
}

impl SplitOptions {
    pub fn new(delimiter: impl Into<String>) -> Self {
        Self {
            delimiter: delimiter.into(),
            ..Self::default()
        }
    }

    pub fn with_comment_marker(mut self, marker: impl Into<String>) -> Self {
        self.comment_marker = marker.into();
        self
    }
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
            comment_marker: DEFAULT_COMMENT_MARKER.to_string(),
        }
    }
}

/// Split script text into statements using `delimiter` and `--` comments
pub fn split(raw: &str, delimiter: &str) -> Vec<String> {
    split_with(raw, &SplitOptions::new(delimiter))
}

/// Split script text into trimmed, delimiter-free statements in source order
pub fn split_with(raw: &str, options: &SplitOptions) -> Vec<String> {
    let delimiter = options.delimiter.as_str();
    let marker = options.comment_marker.as_str();

    let mut statements = Vec::new();
    let mut buffer = String::new();

    for line in raw.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || (!marker.is_empty() && trimmed.starts_with(marker)) {
            continue;
        }

        buffer.push_str(line);
        buffer.push('\n');

        if trimmed.ends_with(delimiter) {
            push_statement(&mut statements, &buffer, delimiter);
            buffer.clear();
        }
    }

    if !buffer.is_empty() {
        tracing::warn!(
            position = statements.len() + 1,
            "script ends without a delimiter; running the trailing statement anyway"
        );
        push_statement(&mut statements, &buffer, delimiter);
    }

    tracing::debug!(count = statements.len(), "script split into statements");
    statements
}

fn push_statement(statements: &mut Vec<String>, buffer: &str, delimiter: &str) {
    let mut stripped = buffer.to_string();
    // Removal can join fragments into a new occurrence, e.g. "GGOO" with "GO".
    while !delimiter.is_empty() && stripped.contains(delimiter) {
        stripped = stripped.replace(delimiter, "");
    }
    let statement = stripped.trim();
    if !statement.is_empty() {
        statements.push(statement.to_string());
    }
}

/// Read a script file.
///
/// Invalid UTF-8 sequences are replaced rather than rejected.
pub fn read_script(path: &Path) -> Result<String> {
    tracing::info!(path = %path.display(), "reading SQL script");
    let bytes = std::fs::read(path).map_err(|source| SqlrunError::Script {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
