//! Publications page: a numbered reference list built from a BibTeX file.
//!
//! Entries are ordered newest first, then by first author surname, then by
//! citation key, and rendered in one fixed citation style:
//!
//! ```text
//! 1. Radtke AJ, Chu CJ, Yaniv Z. IBEX: an open method. *Nature Methods*. 2022;19(1):100–110. [doi:10.1038/x](https://doi.org/10.1038/x)
//! ```

use std::cmp::Reverse;

use crate::bibtex::BibEntry;
use crate::error::Result;
use crate::generators::{fill, Page};
use crate::linker::{link_rows, RowContext, RowFormatter};
use crate::markdown::{link, Template};
use crate::options::{LinkBases, Options};
use crate::table::Row;

/// Template placeholder receiving the list
pub const PLACEHOLDER: &str = "publication_list";

/// Fields naming where an entry was published, in order of preference
const CONTAINER_FIELDS: [&str; 4] = ["journal", "booktitle", "publisher", "howpublished"];

struct CitationFormatter<'a> {
    links: &'a LinkBases,
}

impl CitationFormatter<'_> {
    fn source(entry: &BibEntry, year: &str) -> String {
        let mut source = year.to_string();
        if let Some(volume) = entry.text("volume") {
            source.push(';');
            source.push_str(&volume);
            if let Some(number) = entry.text("number") {
                source.push_str(&format!("({})", number));
            }
        }
        if let Some(pages) = entry.text("pages") {
            source.push(':');
            source.push_str(&pages);
        }
        source
    }
}

impl RowFormatter<BibEntry> for CitationFormatter<'_> {
    fn row_id(&self, entry: &BibEntry) -> String {
        entry.key.clone()
    }

    fn format(&self, entry: &BibEntry, cx: &mut RowContext) -> String {
        let authors = entry.authors();
        if authors.is_empty() {
            cx.invalid("author", "is missing");
        }
        let title = entry.text("title");
        let title = cx.required(title.as_deref(), "title");
        let year = cx.required(entry.field("year"), "year");
        if !year.is_empty() && entry.year().is_none() {
            cx.invalid("year", format!("is not a year: '{}'", year));
        }

        let mut citation = format!(
            "{}. {}.",
            authors.iter().map(|a| a.short()).collect::<Vec<_>>().join(", "),
            title.trim_end_matches('.')
        );
        if let Some(container) = CONTAINER_FIELDS.iter().find_map(|f| entry.text(f)) {
            citation.push_str(&format!(" *{}*.", container));
        }
        citation.push_str(&format!(" {}.", Self::source(entry, year)));
        if let Some(doi) = entry.field("doi") {
            let doi = doi.trim();
            let label = format!("doi:{}", doi);
            citation.push(' ');
            citation.push_str(&link(&label, &self.links.doi(doi)));
        }
        citation
    }
}

/// Citation order: newest first, then first author surname, then key
fn sort_key(entry: &BibEntry) -> (Reverse<Option<i32>>, String, String) {
    let surname = entry
        .authors()
        .first()
        .map(|a| a.last.to_lowercase())
        .unwrap_or_default();
    (Reverse(entry.year()), surname, entry.key.clone())
}

/// Render the reference list into `template`.
///
/// Problems are reported against the line where the entry starts.
pub fn render(template: &Template, entries: &[BibEntry], options: &Options) -> Result<Page> {
    let mut rows: Vec<Row<&BibEntry>> = entries.iter().map(|e| Row::new(e.line, e)).collect();
    rows.sort_by_cached_key(|row| sort_key(row.record));
    let rows: Vec<Row<BibEntry>> = rows
        .into_iter()
        .map(|row| Row::new(row.number, row.record.clone()))
        .collect();

    let formatter = CitationFormatter {
        links: &options.links,
    };
    let (fragments, report) = link_rows(&rows, &formatter, &options.linking).into_parts();
    let list = fragments
        .iter()
        .enumerate()
        .map(|(i, citation)| format!("{}. {}", i + 1, citation))
        .collect::<Vec<_>>()
        .join("\n");
    log::info!("Rendered {} publication(s)", fragments.len());

    Ok(Page {
        contents: fill(template, PLACEHOLDER, &list)?,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bibtex::parse;

    const BIB: &str = r#"
@article{older,
  author = {Yaniv, Ziv and Radtke, Andrea J.},
  title = {Older work.},
  journal = {Bioinformatics},
  year = 2019,
}

@article{radtke2022,
  author = {Radtke, Andrea J. and Chu, Colin J.},
  title = {{IBEX}: an open method},
  journal = {Nature Methods},
  year = 2022,
  volume = 19,
  number = 1,
  pages = {100--110},
  doi = {10.1038/x},
}

@inproceedings{anderson2022,
  author = {Anderson, Kim},
  title = {Same year, earlier surname},
  booktitle = {Proc. Imaging},
  year = 2022,
}
"#;

    fn template() -> Template {
        Template::parse("publications.md.in", "{publication_list}\n").unwrap()
    }

    #[test]
    fn test_render_sorted_numbered_citations() {
        let entries = parse(BIB).unwrap();
        let page = render(&template(), &entries, &Options::default()).unwrap();

        assert!(page.is_clean(), "{}", page.report);
        let lines: Vec<&str> = page.contents.lines().collect();
        assert_eq!(
            lines,
            vec![
                "1. Anderson K. Same year, earlier surname. *Proc. Imaging*. 2022.",
                "2. Radtke AJ, Chu CJ. IBEX: an open method. *Nature Methods*. \
                 2022;19(1):100–110. [doi:10.1038/x](https://doi.org/10.1038/x)",
                "3. Yaniv Z, Radtke AJ. Older work. *Bioinformatics*. 2019.",
            ]
        );
    }

    #[test]
    fn test_incomplete_entries_are_reported_by_line() {
        let bib = "@misc{nodate,\n  title = {Untitled},\n}\n\
                   @misc{ok, author = {A, B}, title = {T}, year = 2020}";
        let entries = parse(bib).unwrap();
        let page = render(&template(), &entries, &Options::default()).unwrap();

        let errors = page.report.errors();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.id() == "nodate" && e.row() == 1));
        assert_eq!(page.contents, "1. A B. T. 2020.\n");
    }
}
