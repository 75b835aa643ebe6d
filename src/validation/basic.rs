//! Config driven checks that apply to any knowledge-base table.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use regex::Regex;
use serde::Deserialize;

use crate::error::{KbError, Result};
use crate::files::read_text;
use crate::table::Table;
use crate::validation::report::{rows_phrase, ValidationReport};

/// Which checks to run on a table. Every key is optional.
///
/// ```json
/// {
///   "required_columns": ["Vendor", "URL"],
///   "unique_columns": ["Vendor"],
///   "column_regex": {"URL": "https?://.+"},
///   "no_empty_cells": true
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BasicConfig {
    /// Columns the header row must contain
    pub required_columns: Vec<String>,
    /// Columns whose values must not repeat
    pub unique_columns: Vec<String>,
    /// Column to the values its cells may take
    pub column_is_in: BTreeMap<String, Vec<String>>,
    /// Column to the values each `;` separated entry of its cells may take
    pub multi_value_column_is_in: BTreeMap<String, Vec<String>>,
    /// Column to a pattern every cell must match in full
    pub column_regex: BTreeMap<String, String>,
    /// Reject blank cells
    pub no_empty_cells: bool,
}

impl BasicConfig {
    /// Load a config from a JSON file
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = read_text(path)?;
        Self::from_str(&path.display().to_string(), &text)
    }

    /// Parse a config from JSON text; `name` is used in error messages
    pub fn from_str(name: &str, text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|source| KbError::Json {
            name: name.to_string(),
            source,
        })
    }
}

/// Compile every `column_regex` pattern anchored at both ends
fn compile_patterns(config: &BasicConfig) -> Result<Vec<(&str, &str, Regex)>> {
    config
        .column_regex
        .iter()
        .map(|(column, pattern)| {
            Regex::new(&format!("^(?:{})$", pattern))
                .map(|re| (column.as_str(), pattern.as_str(), re))
                .map_err(|source| KbError::InvalidPattern {
                    column: column.clone(),
                    source,
                })
        })
        .collect()
}

/// `(row number, value)` of every cell in `column`, in row order
fn column_cells<'a>(table: &'a Table, column: &str) -> Vec<(usize, &'a str)> {
    table
        .records()
        .into_iter()
        .map(|row| (row.number, row.record.get(column).unwrap_or_default()))
        .collect()
}

/// Problems for a column the table lacks
fn missing(table: &Table, column: &str) -> Option<Vec<String>> {
    if table.has_column(column) {
        None
    } else {
        Some(vec![format!("column '{}' is missing", column)])
    }
}

fn duplicated_values(table: &Table, column: &str) -> Vec<String> {
    let mut seen: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (number, value) in column_cells(table, column) {
        seen.entry(value).or_default().push(number);
    }
    seen.into_iter()
        .filter(|(_, rows)| rows.len() > 1)
        .map(|(value, rows)| format!("'{}' repeats in {}", value, rows_phrase(&rows)))
        .collect()
}

fn values_not_in(
    table: &Table,
    column: &str,
    allowed: &[String],
    multi_value: bool,
) -> Vec<String> {
    let allowed: BTreeSet<&str> = allowed.iter().map(|v| v.trim()).collect();
    let mut problems = Vec::new();
    for (number, cell) in column_cells(table, column) {
        let values: Vec<&str> = if multi_value {
            cell.split(';').map(str::trim).filter(|v| !v.is_empty()).collect()
        } else {
            vec![cell]
        };
        for value in values {
            if !allowed.contains(value) {
                problems.push(format!("row {}: '{}' is not an allowed value", number, value));
            }
        }
    }
    problems
}

fn not_matching(table: &Table, column: &str, pattern: &str, re: &Regex) -> Vec<String> {
    column_cells(table, column)
        .into_iter()
        .filter(|(_, value)| !re.is_match(value))
        .map(|(number, value)| format!("row {}: '{}' does not match '{}'", number, value, pattern))
        .collect()
}

/// Blank cells grouped by column
pub(crate) fn empty_cell_problems(table: &Table) -> Vec<String> {
    let mut by_column: Vec<(String, Vec<usize>)> = Vec::new();
    for (column, number) in table.empty_cells() {
        match by_column.last_mut() {
            Some((last, rows)) if *last == column => rows.push(number),
            _ => by_column.push((column, vec![number])),
        }
    }
    by_column
        .into_iter()
        .map(|(column, rows)| format!("'{}' is empty in {}", column, rows_phrase(&rows)))
        .collect()
}

/// Run every check `config` asks for and add the results to `report`.
///
/// Checks on a column the table lacks fail with that reason. Only a pattern
/// that is not a valid regular expression aborts the run.
pub fn validate_table(
    table: &Table,
    config: &BasicConfig,
    report: &mut ValidationReport,
) -> Result<()> {
    let patterns = compile_patterns(config)?;

    let empty = if table.is_empty() {
        vec![format!("{} has no data rows", table.name())]
    } else {
        Vec::new()
    };
    report.add_remarks("Table has rows", empty);

    if !config.required_columns.is_empty() {
        let problems = config
            .required_columns
            .iter()
            .filter(|c| !table.has_column(c))
            .map(|c| format!("column '{}' is missing", c))
            .collect();
        report.add_problems("Required columns", problems);
    }

    for column in &config.unique_columns {
        let problems = missing(table, column).unwrap_or_else(|| duplicated_values(table, column));
        report.add_problems(format!("Unique values in '{}'", column), problems);
    }

    for (column, allowed) in &config.column_is_in {
        let problems =
            missing(table, column).unwrap_or_else(|| values_not_in(table, column, allowed, false));
        report.add_problems(format!("Allowed values in '{}'", column), problems);
    }

    for (column, allowed) in &config.multi_value_column_is_in {
        let problems =
            missing(table, column).unwrap_or_else(|| values_not_in(table, column, allowed, true));
        report.add_problems(format!("Allowed values in '{}'", column), problems);
    }

    for (column, pattern, re) in &patterns {
        let problems =
            missing(table, column).unwrap_or_else(|| not_matching(table, column, pattern, re));
        report.add_problems(format!("Format of '{}'", column), problems);
    }

    if config.no_empty_cells {
        report.add_problems("No empty cells", empty_cell_problems(table));
    }

    log::info!(
        "Validated {} ({} rows): {} check(s) failed",
        table.name(),
        table.len(),
        report.failure_count()
    );
    Ok(())
}
