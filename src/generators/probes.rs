//! Fluorescent probes page.
//!
//! The probe table has no fixed column set beyond the two wavelength columns;
//! every column is rendered as is. Rows are ordered by excitation maximum,
//! then emission maximum, comparing numerically. Problems are still reported
//! in input row order.

use std::cmp::Ordering;

use crate::error::Result;
use crate::generators::{fill, render_table, Page};
use crate::linker::{link_rows, LinkError, RowContext, RowFormatter};
use crate::markdown::{MarkdownTable, Template};
use crate::options::Options;
use crate::table::{Record, Table};

/// Template placeholder receiving the table
pub const PLACEHOLDER: &str = "probe_table";

/// Excitation maximum column
pub const EXCITATION_MAX: &str = "Excitation Max (nm)";

/// Emission maximum column
pub const EMISSION_MAX: &str = "Emission Max (nm)";

fn wavelength(record: &Record<'_>, column: &str) -> Option<f64> {
    record.get(column)?.trim().parse().ok()
}

/// Sort key; rows with unreadable wavelengths go last
fn sort_key(record: &Record<'_>) -> (f64, f64) {
    (
        wavelength(record, EXCITATION_MAX).unwrap_or(f64::INFINITY),
        wavelength(record, EMISSION_MAX).unwrap_or(f64::INFINITY),
    )
}

fn compare(a: &Record<'_>, b: &Record<'_>) -> Ordering {
    let (a_ex, a_em) = sort_key(a);
    let (b_ex, b_em) = sort_key(b);
    a_ex.total_cmp(&b_ex).then(a_em.total_cmp(&b_em))
}

struct ProbeFormatter<'t> {
    table: &'t MarkdownTable,
}

impl<'a> RowFormatter<Record<'a>> for ProbeFormatter<'_> {
    fn row_id(&self, record: &Record<'a>) -> String {
        record.values().next().unwrap_or_default().to_string()
    }

    fn placeholder(&self, record: &Record<'a>, text: &str) -> String {
        self.table.filled_row(&self.row_id(record), text)
    }

    fn format(&self, record: &Record<'a>, cx: &mut RowContext) -> String {
        for column in [EXCITATION_MAX, EMISSION_MAX] {
            let value = cx.required(record.get(column), column);
            if !value.is_empty() && value.parse::<f64>().is_err() {
                cx.invalid(column, format!("is not a number: '{}'", value));
            }
        }
        self.table.row(&record.values().collect::<Vec<_>>())
    }
}

/// Render the probe table into `template`.
pub fn render(template: &Template, probes: &Table, options: &Options) -> Result<Page> {
    probes.require_columns(&[EXCITATION_MAX, EMISSION_MAX])?;

    let mut rows = probes.records();
    rows.sort_by(|a, b| compare(&a.record, &b.record));

    let table = MarkdownTable::new(probes.headers());
    let mut output = link_rows(&rows, &ProbeFormatter { table: &table }, &options.linking);
    // Report in input order, not display order
    output.errors.sort_by_key(LinkError::row);
    let (rendered, report) = render_table(&table, output);
    log::info!("Rendered {} probe(s)", probes.len());

    Ok(Page {
        contents: fill(template, PLACEHOLDER, &rendered)?,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KbError;

    const PROBES: &str = "\
Fluorophore,Excitation Max (nm),Emission Max (nm),Vendor
AF647,650,665,Acme
BV421,405,421,Acme
AF488,490,525,Acme
FITC,490,520,Globex
Cy7,1000,1100,NA
";

    fn template() -> Template {
        Template::parse("fluorescent_probes.md.in", "{probe_table}").unwrap()
    }

    fn names(contents: &str) -> Vec<String> {
        contents
            .lines()
            .skip(2)
            .map(|l| l.split('|').nth(1).unwrap_or_default().trim().to_string())
            .collect()
    }

    #[test]
    fn test_rows_sorted_numerically_by_excitation_then_emission() {
        let probes = Table::from_reader("fluorescent_probes.csv", PROBES.as_bytes()).unwrap();
        let page = render(&template(), &probes, &Options::default()).unwrap();

        assert!(page.is_clean());
        assert_eq!(names(&page.contents), vec!["BV421", "FITC", "AF488", "AF647", "Cy7"]);
        assert!(page
            .contents
            .starts_with("| Fluorophore | Excitation Max (nm) | Emission Max (nm) | Vendor |"));
        assert!(page.contents.contains("| Cy7 | 1000 | 1100 | NA |"));
    }

    #[test]
    fn test_ties_keep_input_order() {
        let csv = "Fluorophore,Excitation Max (nm),Emission Max (nm)\nB,490,520\nA,490,520\n";
        let probes = Table::from_reader("probes.csv", csv.as_bytes()).unwrap();
        let page = render(&template(), &probes, &Options::default()).unwrap();
        assert_eq!(names(&page.contents), vec!["B", "A"]);
    }

    #[test]
    fn test_non_numeric_wavelength_is_reported() {
        let csv = "Fluorophore,Excitation Max (nm),Emission Max (nm)\nX,n/a,520\nY,,530\n";
        let probes = Table::from_reader("probes.csv", csv.as_bytes()).unwrap();
        let page = render(&template(), &probes, &Options::default()).unwrap();

        let errors = page.report.errors();
        assert_eq!(errors.len(), 2);
        assert!(matches!(
            &errors[0],
            LinkError::Format { row: 2, column, .. } if column == EXCITATION_MAX
        ));
        assert_eq!(
            errors[1].to_string(),
            "row 3 (Y): column 'Excitation Max (nm)' is empty"
        );
        assert!(names(&page.contents).is_empty());
    }

    #[test]
    fn test_problems_are_reported_in_input_order() {
        let csv = "Fluorophore,Excitation Max (nm),Emission Max (nm)\n\
                   Late,700,x\n\
                   Early,400,y\n";
        let probes = Table::from_reader("probes.csv", csv.as_bytes()).unwrap();
        let page = render(&template(), &probes, &Options::default()).unwrap();

        let rows: Vec<usize> = page.report.errors().iter().map(LinkError::row).collect();
        assert_eq!(rows, vec![2, 3]);
        assert_eq!(page.report.errors()[0].id(), "Late");
    }

    #[test]
    fn test_missing_wavelength_column_is_fatal() {
        let probes = Table::from_reader("probes.csv", "Fluorophore\nX\n".as_bytes()).unwrap();
        let err = render(&template(), &probes, &Options::default()).unwrap_err();
        assert!(matches!(err, KbError::MissingColumns { columns, .. } if columns.len() == 2));
    }
}
