//! # Record Linker/Formatter
//!
//! Turns the rows of a primary table into Markdown fragments, one per row and
//! in input order. While a row is formatted its foreign keys are resolved
//! against [`LookupTable`]s and its required values are checked; every failure
//! is recorded on a [`RowContext`] instead of aborting, so a single run lists
//! every problem in the input.
//!
//! ```
//! use kbmd::linker::{link_rows, LinkOptions, RowContext, RowFormatter};
//! use kbmd::lookup::LookupTable;
//! use kbmd::table::Row;
//!
//! struct Item { id: &'static str, vendor: &'static str }
//!
//! struct ItemFormatter { vendors: LookupTable<(&'static str, &'static str)> }
//!
//! impl RowFormatter<Item> for ItemFormatter {
//!     fn row_id(&self, row: &Item) -> String {
//!         row.id.to_string()
//!     }
//!
//!     fn format(&self, row: &Item, cx: &mut RowContext) -> String {
//!         match cx.resolve(&self.vendors, "vendor_id", row.vendor) {
//!             Some((name, url)) => format!("{} from [{}]({})", row.id, name, url),
//!             None => String::new(),
//!         }
//!     }
//! }
//!
//! let vendors = LookupTable::build(
//!     "vendors",
//!     [("Acme", "http://acme.example")],
//!     |(name, _)| Some(name.to_string()),
//! );
//! let rows = vec![Row::new(2, Item { id: "AB123", vendor: "Acme" })];
//! let output = link_rows(&rows, &ItemFormatter { vendors }, &LinkOptions::default());
//!
//! assert_eq!(output.fragments[0].as_str(), "AB123 from [Acme](http://acme.example)");
//! ```

mod error;

#[cfg(test)]
mod tests;

use std::fmt;

use serde::Deserialize;

use crate::lookup::LookupTable;
use crate::table::Row;

pub use error::{LinkError, LinkReport};

/// A rendered Markdown snippet for one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment(String);

impl Fragment {
    /// Borrow the rendered text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take the rendered text
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Fragment {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// What to emit for a row that failed to link
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    /// Emit nothing for the failed row
    #[default]
    Strict,
    /// Emit a placeholder fragment for the failed row
    Placeholder,
}

/// Options controlling how failed rows are rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkOptions {
    /// Behaviour for rows with errors
    pub strictness: Strictness,
    /// Placeholder text for rows with errors in [`Strictness::Placeholder`] mode
    pub placeholder: String,
}

impl Default for LinkOptions {
    fn default() -> Self {
        Self {
            strictness: Strictness::Strict,
            placeholder: "unavailable".to_string(),
        }
    }
}

/// Renders one row type into a fragment
pub trait RowFormatter<R> {
    /// Identifier of the row used in error reports (e.g. catalog number, DOI)
    fn row_id(&self, row: &R) -> String;

    /// Render the row. Problems are recorded on `cx`; the returned text is
    /// discarded when any were recorded.
    fn format(&self, row: &R, cx: &mut RowContext) -> String;

    /// Fragment emitted for a failed row in [`Strictness::Placeholder`] mode
    fn placeholder(&self, row: &R, text: &str) -> String {
        format!("{}: {}", self.row_id(row), text)
    }
}

/// Error collector for the row being formatted
#[derive(Debug)]
pub struct RowContext {
    row: usize,
    id: String,
    errors: Vec<LinkError>,
}

impl RowContext {
    /// Create a context for row number `row` identified by `id`
    pub fn new(row: usize, id: impl Into<String>) -> Self {
        Self {
            row,
            id: id.into(),
            errors: Vec::new(),
        }
    }

    /// Row number of the current row
    pub fn row(&self) -> usize {
        self.row
    }

    /// Identifier of the current row
    pub fn id(&self) -> &str {
        &self.id
    }

    /// True when a problem was recorded for this row
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Problems recorded so far
    pub fn errors(&self) -> &[LinkError] {
        &self.errors
    }

    /// Return the value of a required column, recording a format error when it
    /// is missing or blank. The returned string is empty in that case.
    pub fn required<'v>(&mut self, value: Option<&'v str>, column: &str) -> &'v str {
        match value.map(str::trim) {
            Some(v) if !v.is_empty() => v,
            Some(_) => {
                self.invalid(column, "is empty");
                ""
            }
            None => {
                self.invalid(column, "is missing");
                ""
            }
        }
    }

    /// Resolve `key` from `column` against `table`, recording a resolution
    /// error when it does not match exactly one entry.
    pub fn resolve<'t, V>(
        &mut self,
        table: &'t LookupTable<V>,
        column: &str,
        key: &str,
    ) -> Option<&'t V> {
        match table.resolve(key) {
            Ok(value) => Some(value),
            Err(unresolved) => {
                self.unresolved(column, table.name(), key, unresolved.to_string());
                None
            }
        }
    }

    /// Record a malformed value
    pub fn invalid(&mut self, column: &str, reason: impl Into<String>) {
        self.errors.push(LinkError::Format {
            row: self.row,
            id: self.id.clone(),
            column: column.to_string(),
            reason: reason.into(),
        });
    }

    /// Record a reference that did not resolve
    pub fn unresolved(&mut self, column: &str, table: &str, key: &str, reason: impl Into<String>) {
        self.errors.push(LinkError::Resolution {
            row: self.row,
            id: self.id.clone(),
            column: column.to_string(),
            table: table.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        });
    }

    fn into_errors(self) -> Vec<LinkError> {
        self.errors
    }
}

/// Result of linking a table: the fragments and every row-level problem
#[derive(Debug, Clone, Default)]
pub struct LinkOutput {
    /// Rendered fragments in input order
    pub fragments: Vec<Fragment>,
    /// Problems in row order
    pub errors: Vec<LinkError>,
}

impl LinkOutput {
    /// True when every row linked
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Split into fragments and a report
    pub fn into_parts(self) -> (Vec<Fragment>, LinkReport) {
        (self.fragments, LinkReport::new(self.errors))
    }

    /// Fragments when every row linked, otherwise the full report
    pub fn into_result(self) -> Result<Vec<Fragment>, LinkReport> {
        if self.errors.is_empty() {
            Ok(self.fragments)
        } else {
            Err(LinkReport::new(self.errors))
        }
    }
}

/// Format every row, preserving input order.
///
/// A row with problems contributes no fragment in [`Strictness::Strict`] mode
/// and the formatter's placeholder in [`Strictness::Placeholder`] mode. Its
/// problems are always reported.
pub fn link_rows<'r, R, F>(
    rows: impl IntoIterator<Item = &'r Row<R>>,
    formatter: &F,
    options: &LinkOptions,
) -> LinkOutput
where
    R: 'r,
    F: RowFormatter<R> + ?Sized,
{
    let mut output = LinkOutput::default();
    let mut failed = 0usize;

    for row in rows {
        let mut cx = RowContext::new(row.number, formatter.row_id(&row.record));
        let text = formatter.format(&row.record, &mut cx);

        if cx.has_errors() {
            failed += 1;
            if options.strictness == Strictness::Placeholder {
                let text = formatter.placeholder(&row.record, &options.placeholder);
                output.fragments.push(Fragment(text));
            }
            output.errors.extend(cx.into_errors());
        } else {
            output.fragments.push(Fragment(text));
        }
    }

    if failed > 0 {
        log::warn!("{} row(s) failed to link", failed);
    }
    log::debug!("Linked {} fragment(s)", output.fragments.len());
    output
}

/// Join fragments with `separator`
pub fn join_fragments(fragments: &[Fragment], separator: &str) -> String {
    fragments
        .iter()
        .map(Fragment::as_str)
        .collect::<Vec<_>>()
        .join(separator)
}
