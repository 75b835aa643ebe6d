//! # Delimited tables
//!
//! Every knowledge-base table is a CSV file with a header row. Cells are kept
//! as strings exactly as the contributor typed them (trimmed), so the literal
//! [`NA`] survives and can be told apart from a cell that was left blank.
//!
//! Rows are numbered the way a spreadsheet editor shows them: the header is
//! row 1 and the first data row is row [`FIRST_DATA_ROW`]. Every problem report
//! in this crate uses that numbering.

use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use serde::de::DeserializeOwned;

use crate::error::{KbError, Result};

/// Marker for a cell that was intentionally left empty
pub const NA: &str = "NA";

/// Spreadsheet row number of the first data row
pub const FIRST_DATA_ROW: usize = 2;

/// A loaded row together with its spreadsheet row number
#[derive(Debug, Clone, PartialEq)]
pub struct Row<T> {
    /// Row number as shown in a spreadsheet editor
    pub number: usize,
    /// Row contents
    pub record: T,
}

impl<T> Row<T> {
    /// Wrap a record with its row number
    pub fn new(number: usize, record: T) -> Self {
        Self { number, record }
    }
}

/// Number rows in input order starting at [`FIRST_DATA_ROW`].
pub fn number_rows<T>(records: impl IntoIterator<Item = T>) -> Vec<Row<T>> {
    records
        .into_iter()
        .enumerate()
        .map(|(i, record)| Row::new(i + FIRST_DATA_ROW, record))
        .collect()
}

/// An in-memory CSV table
#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    headers: StringRecord,
    rows: Vec<StringRecord>,
}

impl Table {
    /// Load a table from a CSV file. The file name is used as the table name.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(|e| KbError::io(path, e))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::from_reader(name, file)
    }

    /// Load a table from any reader
    pub fn from_reader<R: Read>(name: impl Into<String>, reader: R) -> Result<Self> {
        let name = name.into();
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let csv_error = |source| KbError::Csv {
            table: name.clone(),
            source,
        };

        let headers = csv_reader.headers().map_err(csv_error)?.clone();
        let rows = csv_reader
            .records()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(csv_error)?;

        log::debug!("Loaded {} rows from {}", rows.len(), name);
        Ok(Self {
            name,
            headers,
            rows,
        })
    }

    /// Table name (usually the file name)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column names in file order
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.headers.iter()
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column, if present
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == column)
    }

    /// True when the header row contains `column`
    pub fn has_column(&self, column: &str) -> bool {
        self.column_index(column).is_some()
    }

    /// Fail when any of `columns` is absent from the header row.
    pub fn require_columns(&self, columns: &[&str]) -> Result<()> {
        let missing: Vec<String> = columns
            .iter()
            .filter(|c| !self.has_column(c))
            .map(|c| c.to_string())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(KbError::MissingColumns {
                table: self.name.clone(),
                columns: missing,
            })
        }
    }

    /// Rows as generic records, in file order
    pub fn records(&self) -> Vec<Row<Record<'_>>> {
        number_rows(self.rows.iter().map(|values| Record {
            headers: &self.headers,
            values,
        }))
    }

    /// Every cell that is blank, as `(column, row number)` pairs ordered by
    /// column then row.
    pub fn empty_cells(&self) -> Vec<(String, usize)> {
        let mut cells = Vec::new();
        for (col, header) in self.headers.iter().enumerate() {
            for row in self.records() {
                if row.record.values.get(col).map_or(true, str::is_empty) {
                    cells.push((header.to_string(), row.number));
                }
            }
        }
        cells
    }

    /// Deserialize every row into a typed record.
    ///
    /// Typed records use `Option<String>` fields so that a missing column or
    /// blank cell is reported per row by the caller rather than aborting here.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<Vec<Row<T>>> {
        let mut rows = Vec::with_capacity(self.rows.len());
        for (i, values) in self.rows.iter().enumerate() {
            let record = values
                .deserialize(Some(&self.headers))
                .map_err(|source| KbError::Csv {
                    table: self.name.clone(),
                    source,
                })?;
            rows.push(Row::new(i + FIRST_DATA_ROW, record));
        }
        Ok(rows)
    }
}

/// Load a CSV file straight into typed records.
pub fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<Row<T>>> {
    Table::from_path(path)?.deserialize()
}

/// One row of a [`Table`], addressed by column name
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    headers: &'a StringRecord,
    values: &'a StringRecord,
}

impl<'a> Record<'a> {
    /// Cell value for `column`, or `None` when the column does not exist
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let index = self.headers.iter().position(|h| h == column)?;
        self.values.get(index)
    }

    /// `(column, value)` pairs in file order
    pub fn cells(&self) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.headers.iter().zip(self.values.iter())
    }

    /// Cell values in file order
    pub fn values(&self) -> impl Iterator<Item = &'a str> {
        self.values.iter()
    }
}

/// True for the explicit empty marker
pub fn is_na(value: &str) -> bool {
    value.trim() == NA
}

/// Split a `;` separated cell into its values, dropping blanks and `NA`.
pub fn split_multi(value: &str) -> Vec<String> {
    value
        .split(';')
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != NA)
        .map(str::to_string)
        .collect()
}

/// Split a `;` separated list cell keeping every position. A cell holding only
/// `NA` is an empty list.
pub fn split_list(value: &str) -> Vec<String> {
    if value.trim().is_empty() || is_na(value) {
        return Vec::new();
    }
    value.split(';').map(|v| v.trim().to_string()).collect()
}
