//! Supporting material skeletons for a batch of new reagent configurations.
//!
//! For every target/conjugate pair and every ORCID in its Agree/Disagree
//! columns one file is produced at `<Target_Conjugate>/<orcid>.md`. It lists
//! the configurations that ORCID took part in, with the image columns left
//! out and an empty `Notes` column added for the contributor to fill in, and
//! shows the images of those configurations.

use std::collections::BTreeSet;
use std::path::Path;

use crate::error::Result;
use crate::linker::{LinkReport, RowContext};
use crate::markdown::{image, link, MarkdownTable, Template};
use crate::options::{LinkBases, Options};
use crate::orcid;
use crate::records::columns;
use crate::supporting::{contributor_file, NOTES_COLUMN};
use crate::table::{split_list, split_multi, Record, Row, Table, NA};

/// One generated supporting material file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportingFile {
    /// Path below the supporting material root, `/` separated
    pub relative_path: String,
    /// Rendered Markdown
    pub contents: String,
}

/// Every generated file and the problems of rows that were skipped
#[derive(Debug, Clone, Default)]
pub struct SupportingPages {
    /// Files in pair order (first appearance), ORCIDs sorted within a pair
    pub files: Vec<SupportingFile>,
    /// Problems of rows that were left out
    pub report: LinkReport,
}

/// A batch row that passed its checks
struct Configuration<'a> {
    record: Record<'a>,
    agree: Vec<String>,
    disagree: Vec<String>,
    table_row: String,
}

impl Configuration<'_> {
    fn involves(&self, orcid: &str) -> bool {
        self.agree.iter().chain(&self.disagree).any(|o| o == orcid)
    }
}

/// Render a contributor cell: every ORCID linked to its profile
fn orcid_cell(links: &LinkBases, value: &str) -> String {
    let orcids = split_multi(value);
    if orcids.is_empty() {
        return NA.to_string();
    }
    orcids
        .iter()
        .map(|o| link(o, &links.orcid(o)))
        .collect::<Vec<_>>()
        .join("; ")
}

fn check_orcids(cx: &mut RowContext, column: &str, value: &str) -> Vec<String> {
    let orcids = split_multi(value);
    for orcid in &orcids {
        if !orcid::is_well_formed(orcid) {
            cx.invalid(column, format!("is not an ORCID: '{}'", orcid));
        }
    }
    orcids
}

fn configuration<'a>(
    row: &Row<Record<'a>>,
    table: &MarkdownTable,
    links: &LinkBases,
    report: &mut LinkReport,
) -> Option<Configuration<'a>> {
    let record = row.record;
    let target = record.get(columns::TARGET).unwrap_or_default();
    let conjugate = record.get(columns::CONJUGATE).unwrap_or_default();
    let mut cx = RowContext::new(row.number, format!("{} {}", target, conjugate));

    cx.required(record.get(columns::TARGET), columns::TARGET);
    cx.required(record.get(columns::CONJUGATE), columns::CONJUGATE);
    let agree = check_orcids(
        &mut cx,
        columns::AGREE,
        record.get(columns::AGREE).unwrap_or_default(),
    );
    let disagree = check_orcids(
        &mut cx,
        columns::DISAGREE,
        record.get(columns::DISAGREE).unwrap_or_default(),
    );
    check_orcids(
        &mut cx,
        columns::CONTRIBUTOR,
        record.get(columns::CONTRIBUTOR).unwrap_or_default(),
    );

    let files = split_list(record.get(columns::IMAGE_FILES).unwrap_or_default());
    let captions = split_list(record.get(columns::CAPTIONS).unwrap_or_default());
    if files.len() != captions.len() {
        cx.invalid(
            columns::CAPTIONS,
            format!("lists {} caption(s) for {} image file(s)", captions.len(), files.len()),
        );
    }

    if cx.has_errors() {
        for error in cx.errors() {
            report.push(error.clone());
        }
        return None;
    }

    let mut cells: Vec<String> = record
        .cells()
        .filter(|(column, _)| !columns::IMAGE_COLUMNS.contains(column))
        .map(|(column, value)| {
            if columns::CONTRIBUTOR_COLUMNS.contains(&column) {
                orcid_cell(links, value)
            } else {
                value.to_string()
            }
        })
        .collect();
    cells.push(String::new());

    Some(Configuration {
        record,
        agree,
        disagree,
        table_row: table.row(&cells),
    })
}

/// Image links of `configurations`, relative to the pair directory
fn images(configurations: &[&Configuration<'_>]) -> String {
    let mut seen = BTreeSet::new();
    let mut out = Vec::new();
    for configuration in configurations {
        let record = configuration.record;
        let files = split_list(record.get(columns::IMAGE_FILES).unwrap_or_default());
        let captions = split_list(record.get(columns::CAPTIONS).unwrap_or_default());
        for (file, caption) in files.iter().zip(&captions) {
            let name = Path::new(file)
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| file.clone());
            if seen.insert(name.clone()) {
                out.push(image(caption, &name));
            }
        }
    }
    out.join("\n\n")
}

/// Render one file per target/conjugate pair and ORCID.
///
/// Rows with problems are left out of every file and reported, whatever the
/// configured strictness: a placeholder has no place in a configuration table.
pub fn render(template: &Template, batch: &Table, options: &Options) -> Result<SupportingPages> {
    batch.require_columns(&[
        columns::TARGET,
        columns::CONJUGATE,
        columns::CONTRIBUTOR,
        columns::AGREE,
        columns::DISAGREE,
    ])?;

    let mut headers: Vec<&str> = batch
        .headers()
        .filter(|h| !columns::IMAGE_COLUMNS.contains(h))
        .collect();
    headers.push(NOTES_COLUMN);
    let table = MarkdownTable::new(headers);

    let mut pages = SupportingPages::default();
    let rows = batch.records();
    let configurations: Vec<Configuration<'_>> = rows
        .iter()
        .filter_map(|row| configuration(row, &table, &options.links, &mut pages.report))
        .collect();

    let mut pairs: Vec<(&str, &str)> = Vec::new();
    for configuration in &configurations {
        let pair = (
            configuration.record.get(columns::TARGET).unwrap_or_default(),
            configuration.record.get(columns::CONJUGATE).unwrap_or_default(),
        );
        if !pairs.contains(&pair) {
            pairs.push(pair);
        }
    }

    for (target, conjugate) in pairs {
        let of_pair: Vec<&Configuration<'_>> = configurations
            .iter()
            .filter(|c| {
                c.record.get(columns::TARGET) == Some(target)
                    && c.record.get(columns::CONJUGATE) == Some(conjugate)
            })
            .collect();
        let orcids: BTreeSet<&str> = of_pair
            .iter()
            .flat_map(|c| c.agree.iter().chain(&c.disagree))
            .map(String::as_str)
            .collect();

        for orcid in orcids {
            let involved: Vec<&Configuration<'_>> =
                of_pair.iter().copied().filter(|c| c.involves(orcid)).collect();
            let configurations_md = table.render(involved.iter().map(|c| c.table_row.as_str()));
            let contents = template.render(&[
                ("target", target),
                ("conjugate", conjugate),
                ("configurations", configurations_md.as_str()),
                ("images", images(&involved).as_str()),
            ])?;
            pages.files.push(SupportingFile {
                relative_path: contributor_file(target, conjugate, orcid),
                contents,
            });
        }
    }

    log::info!(
        "Rendered {} supporting file(s) from {} configuration(s)",
        pages.files.len(),
        configurations.len()
    );
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::supporting::ConfigurationTable;

    const BATCH: &str = "\
Target Name / Protein Biomarker,Clone,Conjugate,Contributor,Agree,Disagree,Image Files,Captions,MD5
CD20,L26,AF488,0000-0001-9561-4256,0000-0001-9561-4256;0000-0003-4379-8967,NA,CD20_AF488/tonsil.png,Tonsil,abc
CD20,H1,AF488,0000-0003-4379-8967,0000-0003-4379-8967,NA,NA,NA,NA
Granzyme B,GB11,Unconjugated,0000-0001-9561-4256,0000-0001-9561-4256,NA,NA,NA,NA
";

    const TEMPLATE: &str = "---\ntitle: {target} {conjugate}\n---\n\n# Configurations\n\n\
                            {configurations}\n\n# Publications\n\n{images}\n";

    fn render_batch(csv: &str) -> SupportingPages {
        let batch = Table::from_reader("reagent_batch.csv", csv.as_bytes()).unwrap();
        let template = Template::parse("supporting_template.md", TEMPLATE).unwrap();
        render(&template, &batch, &Options::default()).unwrap()
    }

    #[test]
    fn test_one_file_per_pair_and_orcid() {
        let pages = render_batch(BATCH);
        assert!(pages.report.is_empty(), "{}", pages.report);

        let paths: Vec<&str> = pages.files.iter().map(|f| f.relative_path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "CD20_AF488/0000-0001-9561-4256.md",
                "CD20_AF488/0000-0003-4379-8967.md",
                "Granzyme_B_Unconjugated/0000-0001-9561-4256.md",
            ]
        );
    }

    #[test]
    fn test_configuration_table_reads_back() {
        let pages = render_batch(BATCH);
        let file = &pages.files[1];
        assert!(file.contents.starts_with("---\ntitle: CD20 AF488\n---"));
        assert!(file.contents.contains("![Tonsil](tonsil.png)"));

        let table = ConfigurationTable::parse(&file.contents).unwrap();
        assert_eq!(
            table.columns,
            vec![
                "Target Name / Protein Biomarker",
                "Clone",
                "Conjugate",
                "Contributor",
                "Agree",
                "Disagree",
                "Notes"
            ]
        );
        // Both CD20 AF488 configurations involve 0000-0003-4379-8967
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1][1], "H1");
        assert_eq!(
            orcid::extract_bracketed(&table.rows[0][4]),
            vec!["0000-0001-9561-4256", "0000-0003-4379-8967"]
        );
        assert_eq!(table.rows[0][5], "NA");
        assert_eq!(table.rows[0][6], "");
    }

    #[test]
    fn test_bad_rows_are_skipped_and_reported() {
        let csv = "\
Target Name / Protein Biomarker,Conjugate,Contributor,Agree,Disagree
CD20,AF488,0000-0001-9561-4256,0000-0001-9561-4256,NA
,PE,0000-0001-9561-4256,0000-0001-9561-4256,NA
CD3,AF647,0000-0001-9561-4256,not-an-orcid,NA
";
        let pages = render_batch(csv);
        assert_eq!(pages.files.len(), 1);
        let rows: Vec<usize> = pages.report.errors().iter().map(|e| e.row()).collect();
        assert_eq!(rows, vec![3, 4]);
    }
}
