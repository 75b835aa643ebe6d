//! Contributor guide page: the reagent data dictionary and the glossary.

use crate::error::Result;
use crate::generators::{render_list, render_table, Page};
use crate::linker::{link_rows, RowContext, RowFormatter};
use crate::lookup::LookupTable;
use crate::markdown::{MarkdownTable, Template};
use crate::options::Options;
use crate::records::{DictionaryEntry, GlossaryTerm};
use crate::table::Row;

/// Template placeholder receiving the data dictionary table
pub const DICTIONARY_PLACEHOLDER: &str = "data_dictionary";

/// Template placeholder receiving the glossary
pub const GLOSSARY_PLACEHOLDER: &str = "glossary";

struct DictionaryFormatter<'a> {
    table: &'a MarkdownTable,
}

impl RowFormatter<DictionaryEntry> for DictionaryFormatter<'_> {
    fn row_id(&self, entry: &DictionaryEntry) -> String {
        entry.column.clone().unwrap_or_default()
    }

    fn placeholder(&self, entry: &DictionaryEntry, text: &str) -> String {
        self.table.filled_row(&self.row_id(entry), text)
    }

    fn format(&self, entry: &DictionaryEntry, cx: &mut RowContext) -> String {
        let column = cx.required(entry.column.as_deref(), "Column Name");
        let description = cx.required(entry.description.as_deref(), "Description");
        let required = cx.required(entry.required.as_deref(), "Required");
        self.table.row(&[column, description, required])
    }
}

fn term_key(term: &GlossaryTerm) -> Option<String> {
    term.term
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

struct GlossaryFormatter {
    terms: LookupTable<()>,
}

impl RowFormatter<GlossaryTerm> for GlossaryFormatter {
    fn row_id(&self, term: &GlossaryTerm) -> String {
        term.term.clone().unwrap_or_default()
    }

    fn format(&self, term: &GlossaryTerm, cx: &mut RowContext) -> String {
        let name = cx.required(term.term.as_deref(), "Term");
        let definition = cx.required(term.definition.as_deref(), "Definition");
        if !name.is_empty() {
            // A term defined twice resolves ambiguously
            cx.resolve(&self.terms, "Term", &name.to_lowercase());
        }
        format!("**{}**: {}", name, definition)
    }
}

/// Render the dictionary (input order) and the glossary (sorted
/// case-insensitively) into `template`.
pub fn render(
    template: &Template,
    dictionary: &[Row<DictionaryEntry>],
    glossary: &[Row<GlossaryTerm>],
    options: &Options,
) -> Result<Page> {
    let table = MarkdownTable::new(["Column Name", "Description", "Required"]);
    let formatter = DictionaryFormatter { table: &table };
    let output = link_rows(dictionary, &formatter, &options.linking);
    let (dictionary_md, mut report) = render_table(&table, output);

    let mut sorted: Vec<&Row<GlossaryTerm>> = glossary.iter().collect();
    sorted.sort_by_cached_key(|row| term_key(&row.record).unwrap_or_default());
    let mut terms = LookupTable::new("glossary");
    for key in glossary.iter().filter_map(|row| term_key(&row.record)) {
        terms.insert(key, ());
    }
    let formatter = GlossaryFormatter { terms };
    let output = link_rows(sorted, &formatter, &options.linking);
    let (glossary_md, glossary_report) = render_list(output, "\n\n");
    report.merge(glossary_report);

    log::info!(
        "Rendered {} dictionary entries and {} glossary term(s)",
        dictionary.len(),
        glossary.len()
    );
    let contents = template.render(&[
        (DICTIONARY_PLACEHOLDER, dictionary_md.as_str()),
        (GLOSSARY_PLACEHOLDER, glossary_md.as_str()),
    ])?;
    Ok(Page { contents, report })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linker::LinkError;
    use crate::lookup::Unresolved;
    use crate::table::number_rows;

    const TEMPLATE: &str = "# Data dictionary\n\n{data_dictionary}\n\n# Glossary\n\n{glossary}\n";

    fn term(term: &str, definition: &str) -> GlossaryTerm {
        GlossaryTerm {
            term: Some(term.to_string()),
            definition: Some(definition.to_string()),
        }
    }

    fn dictionary() -> Vec<Row<DictionaryEntry>> {
        number_rows([
            DictionaryEntry {
                column: Some("Target Name / Protein Biomarker".to_string()),
                description: Some("Protein the antibody binds".to_string()),
                required: Some("Yes".to_string()),
            },
            DictionaryEntry {
                column: Some("Clone".to_string()),
                description: Some("Antibody clone".to_string()),
                required: Some("Yes".to_string()),
            },
        ])
    }

    #[test]
    fn test_dictionary_in_input_order_glossary_sorted() {
        let glossary = number_rows([
            term("Photobleaching", "Loss of fluorescence."),
            term("antibody", "A protein."),
            term("Conjugate", "A label."),
        ]);
        let template = Template::parse("contrib.md.in", TEMPLATE).unwrap();
        let page = render(&template, &dictionary(), &glossary, &Options::default()).unwrap();

        assert!(page.is_clean(), "{}", page.report);
        let target = page.contents.find("| Target Name").unwrap();
        let clone = page.contents.find("| Clone |").unwrap();
        assert!(target < clone);
        assert!(page.contents.ends_with(
            "**antibody**: A protein.\n\n\
             **Conjugate**: A label.\n\n\
             **Photobleaching**: Loss of fluorescence.\n"
        ));
    }

    #[test]
    fn test_duplicate_terms_are_ambiguous() {
        let glossary = number_rows([
            term("IBEX", "Iterative bleaching."),
            term("ibex", "Same term, different case."),
            term("Panel", "Antibodies imaged together."),
        ]);
        let template = Template::parse("contrib.md.in", TEMPLATE).unwrap();
        let page = render(&template, &dictionary(), &glossary, &Options::default()).unwrap();

        let errors = page.report.errors();
        assert_eq!(errors.len(), 2);
        for error in errors {
            match error {
                LinkError::Resolution { table, reason, .. } => {
                    assert_eq!(table, "glossary");
                    assert_eq!(reason, &Unresolved::Ambiguous(2).to_string());
                }
                other => panic!("unexpected error {:?}", other),
            }
        }
        assert!(page.contents.contains("**Panel**"));
        assert!(!page.contents.contains("**IBEX**"));
    }
}
