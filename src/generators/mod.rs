//! # Page generators
//!
//! One module per generated page. Each generator takes already loaded inputs
//! plus [`Options`](crate::options::Options) and returns a [`Page`]; reading
//! input files and writing the result is left to the caller.
//!
//! Row-level problems never abort a generator. They are collected in
//! [`Page::report`] and the page is rendered from the rows that linked (or
//! with placeholders, depending on [`Strictness`](crate::linker::Strictness)).

pub mod contributors;
pub mod data_software;
pub mod glossary;
pub mod index_stats;
pub mod probes;
pub mod protocols;
pub mod publications;
pub mod reagents;
pub mod supporting;
pub mod videos;

use std::path::Path;

use crate::error::Result;
use crate::files::write_atomic;
use crate::linker::{join_fragments, LinkOutput, LinkReport, Strictness};
use crate::markdown::{MarkdownTable, Template};

/// A rendered page and the row-level problems found while rendering it
#[derive(Debug, Clone, Default)]
pub struct Page {
    /// Rendered Markdown
    pub contents: String,
    /// Problems of rows that did not link
    pub report: LinkReport,
}

impl Page {
    /// Page without problems
    pub fn clean(contents: String) -> Self {
        Self {
            contents,
            report: LinkReport::default(),
        }
    }

    /// True when every row linked
    pub fn is_clean(&self) -> bool {
        self.report.is_empty()
    }

    /// Write the page to `output` unless it has problems and `strictness` is
    /// [`Strictness::Strict`]. Returns whether the file was written.
    pub fn write(&self, output: &Path, strictness: Strictness) -> Result<bool> {
        if !self.is_clean() && strictness == Strictness::Strict {
            log::warn!(
                "{} row problem(s), not writing {}",
                self.report.len(),
                output.display()
            );
            return Ok(false);
        }
        write_atomic(output, &self.contents)?;
        Ok(true)
    }

    /// The contents when every row linked, otherwise the report
    pub fn into_result(self) -> std::result::Result<String, LinkReport> {
        if self.report.is_empty() {
            Ok(self.contents)
        } else {
            Err(self.report)
        }
    }
}

/// Render linked rows as a pipe table body under `table`'s header
pub(crate) fn render_table(table: &MarkdownTable, output: LinkOutput) -> (String, LinkReport) {
    let (fragments, report) = output.into_parts();
    (table.render(fragments.iter().map(|f| f.as_str())), report)
}

/// Render linked rows as a list, one fragment per paragraph
pub(crate) fn render_list(output: LinkOutput, separator: &str) -> (String, LinkReport) {
    let (fragments, report) = output.into_parts();
    (join_fragments(&fragments, separator), report)
}

/// Fill a single placeholder template
pub(crate) fn fill(template: &Template, placeholder: &str, value: &str) -> Result<String> {
    Ok(template.render(&[(placeholder, value)])?)
}
