//! Consistency checks between the reagent resources table, the contributor
//! list, the vendor table and the supporting material directory.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::error::Result;
use crate::files::{list_files, md5_hex, normalize_key, read_text, relative_key};
use crate::options::ValidationOptions;
use crate::orcid::extract_bracketed;
use crate::records::columns;
use crate::supporting::{
    contributor_file, dir_name, is_markdown, markdown_files, ConfigurationTable, NOTES_COLUMN,
};
use crate::table::{is_na, split_list, split_multi, Record, Row, Table, NA};
use crate::validation::basic::{empty_cell_problems, validate_table, BasicConfig};
use crate::validation::report::{rows_phrase, ValidationReport};
use crate::zenodo::ZenodoMetadata;

/// Columns every reagent table must have for the structural checks to run
pub const REQUIRED_COLUMNS: [&str; 8] = [
    columns::TARGET,
    columns::CONJUGATE,
    columns::CONTRIBUTOR,
    columns::AGREE,
    columns::DISAGREE,
    columns::IMAGE_FILES,
    columns::CAPTIONS,
    columns::MD5,
];

/// Everything the reagent checks look at
#[derive(Debug, Clone, Copy)]
pub struct ReagentInputs<'a> {
    /// Reagent resources table
    pub reagents: &'a Table,
    /// Table specific basic checks
    pub config: &'a BasicConfig,
    /// Knowledge-base contributors
    pub zenodo: &'a ZenodoMetadata,
    /// Vendor table
    pub vendors: &'a Table,
    /// Supporting material root directory
    pub supporting_root: &'a Path,
}

type Reagent<'a> = Row<Record<'a>>;

fn cell<'a>(row: &Reagent<'a>, column: &str) -> &'a str {
    row.record.get(column).unwrap_or_default()
}

/// The table config extended with the value lists derived from the other inputs
fn reagent_config(inputs: &ReagentInputs<'_>) -> BasicConfig {
    let mut config = inputs.config.clone();
    // Blank cells get their own check with a more specific message
    config.no_empty_cells = false;

    let mut orcids = inputs.zenodo.orcids();
    orcids.push(NA.to_string());

    let mut vendors: Vec<String> = inputs
        .vendors
        .records()
        .iter()
        .filter_map(|row| row.record.get(columns::VENDOR_NAME))
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();
    vendors.push(NA.to_string());

    config
        .column_is_in
        .insert(columns::CONTRIBUTOR.to_string(), orcids.clone());
    config
        .column_is_in
        .insert(columns::VENDOR.to_string(), vendors);
    config
        .multi_value_column_is_in
        .insert(columns::AGREE.to_string(), orcids.clone());
    config
        .multi_value_column_is_in
        .insert(columns::DISAGREE.to_string(), orcids);
    config
}

fn duplicate_rows(table: &Table, rows: &[Reagent<'_>]) -> Vec<String> {
    let compared: Vec<&str> = table
        .headers()
        .filter(|h| !columns::CONTRIBUTOR_COLUMNS.contains(h))
        .collect();
    let mut seen: BTreeMap<Vec<&str>, Vec<usize>> = BTreeMap::new();
    for row in rows {
        let key = compared.iter().map(|c| cell(row, c)).collect();
        seen.entry(key).or_default().push(row.number);
    }
    let mut duplicates: Vec<Vec<usize>> = seen
        .into_values()
        .filter(|numbers| numbers.len() > 1)
        .collect();
    duplicates.sort();
    duplicates
        .iter()
        .map(|numbers| format!("{} describe the same configuration", rows_phrase(numbers)))
        .collect()
}

fn contributor_not_listed(rows: &[Reagent<'_>]) -> Vec<String> {
    rows.iter()
        .filter_map(|row| {
            let contributor = cell(row, columns::CONTRIBUTOR).trim();
            if contributor.is_empty() || is_na(contributor) {
                return None;
            }
            let listed = split_multi(cell(row, columns::AGREE))
                .into_iter()
                .chain(split_multi(cell(row, columns::DISAGREE)))
                .any(|o| o == contributor);
            (!listed).then(|| format!("row {}: '{}'", row.number, contributor))
        })
        .collect()
}

fn too_many_orcids(rows: &[Reagent<'_>], max: usize) -> Vec<String> {
    let mut problems = Vec::new();
    for row in rows {
        for column in [columns::AGREE, columns::DISAGREE] {
            let count = split_multi(cell(row, column)).len();
            if count > max {
                problems.push(format!("row {}: {} lists {} ORCIDs", row.number, column, count));
            }
        }
    }
    problems
}

fn agree_and_disagree(rows: &[Reagent<'_>]) -> Vec<String> {
    let mut problems = Vec::new();
    for row in rows {
        let agree: BTreeSet<String> = split_multi(cell(row, columns::AGREE)).into_iter().collect();
        for orcid in split_multi(cell(row, columns::DISAGREE)) {
            if agree.contains(&orcid) {
                problems.push(format!("row {}: '{}'", row.number, orcid));
            }
        }
    }
    problems
}

/// ORCIDs as a canonical sorted `;` list
fn orcid_set(orcids: Vec<String>) -> String {
    orcids
        .into_iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect::<Vec<_>>()
        .join(";")
}

/// A reagent row reduced to the columns a supporting file repeats
fn csv_configuration(row: &Reagent<'_>, compared: &[&str]) -> Vec<String> {
    compared
        .iter()
        .map(|&column| {
            let value = cell(row, column);
            if column == columns::AGREE || column == columns::DISAGREE {
                orcid_set(split_multi(value))
            } else {
                value.trim().to_string()
            }
        })
        .collect()
}

/// A supporting file row in the same form as [`csv_configuration`]
fn file_configuration(
    table: &ConfigurationTable,
    cells: &[String],
    compared: &[&str],
) -> Vec<String> {
    compared
        .iter()
        .map(|&column| {
            let value = table
                .column_index(column)
                .and_then(|i| cells.get(i))
                .map(String::as_str)
                .unwrap_or_default();
            match column {
                columns::AGREE | columns::DISAGREE => orcid_set(extract_bracketed(value)),
                columns::CONTRIBUTOR => extract_bracketed(value)
                    .into_iter()
                    .next()
                    .unwrap_or_else(|| value.trim().to_string()),
                _ => value.trim().to_string(),
            }
        })
        .collect()
}

/// Differences between a supporting file's configuration table and the rows
/// of the reagent table that involve its ORCID.
fn compare_configurations(
    file: &str,
    table: &ConfigurationTable,
    expected: &[&Reagent<'_>],
    compared: &[&str],
) -> Vec<String> {
    let file_columns: BTreeSet<&str> = table
        .columns
        .iter()
        .map(String::as_str)
        .filter(|c| *c != NOTES_COLUMN)
        .collect();
    let csv_columns: BTreeSet<&str> = compared.iter().copied().collect();
    if file_columns != csv_columns {
        let missing: Vec<&str> = csv_columns.difference(&file_columns).copied().collect();
        let extra: Vec<&str> = file_columns.difference(&csv_columns).copied().collect();
        return vec![format!(
            "{}: configuration columns differ (missing: [{}], unexpected: [{}])",
            file,
            missing.join(", "),
            extra.join(", ")
        )];
    }

    let in_file: BTreeSet<Vec<String>> = table
        .rows
        .iter()
        .map(|cells| file_configuration(table, cells, compared))
        .collect();
    let in_csv: Vec<(usize, Vec<String>)> = expected
        .iter()
        .map(|row| (row.number, csv_configuration(row, compared)))
        .collect();
    let csv_set: BTreeSet<&Vec<String>> = in_csv.iter().map(|(_, c)| c).collect();

    let mut problems = Vec::new();
    let absent: Vec<usize> = in_csv
        .iter()
        .filter(|(_, c)| !in_file.contains(c))
        .map(|(number, _)| *number)
        .collect();
    if !absent.is_empty() {
        problems.push(format!(
            "{}: configuration of {} is not listed",
            file,
            rows_phrase(&absent)
        ));
    }
    let unknown = in_file.iter().filter(|c| !csv_set.contains(c)).count();
    if unknown > 0 {
        problems.push(format!(
            "{}: {} configuration(s) are not in the reagent table",
            file, unknown
        ));
    }
    if problems.is_empty() && table.rows.len() != expected.len() {
        problems.push(format!(
            "{}: lists {} configuration(s), expected {}",
            file,
            table.rows.len(),
            expected.len()
        ));
    }
    problems
}

/// Rows grouped by target/conjugate pair, in order of first appearance
fn pairs<'r, 'a>(rows: &'r [Reagent<'a>]) -> Vec<((&'a str, &'a str), Vec<&'r Reagent<'a>>)> {
    let mut pairs: Vec<((&str, &str), Vec<&Reagent<'a>>)> = Vec::new();
    for row in rows {
        let key = (cell(row, columns::TARGET), cell(row, columns::CONJUGATE));
        match pairs.iter_mut().find(|(k, _)| *k == key) {
            Some((_, members)) => members.push(row),
            None => pairs.push((key, vec![row])),
        }
    }
    pairs
}

fn file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

#[derive(Default)]
struct SupportingProblems {
    configurations: Vec<String>,
    images: Vec<String>,
    superfluous: Vec<String>,
}

fn check_supporting_material(
    table: &Table,
    rows: &[Reagent<'_>],
    root: &Path,
) -> Result<SupportingProblems> {
    let compared: Vec<&str> = table
        .headers()
        .filter(|h| !columns::IMAGE_COLUMNS.contains(h))
        .collect();
    let mut problems = SupportingProblems::default();
    let mut expected_files = BTreeSet::new();

    for ((target, conjugate), members) in pairs(rows) {
        let orcids: BTreeSet<String> = members
            .iter()
            .flat_map(|row| {
                split_multi(cell(row, columns::AGREE))
                    .into_iter()
                    .chain(split_multi(cell(row, columns::DISAGREE)))
            })
            .collect();

        let mut contents = Vec::new();
        for orcid in &orcids {
            let relative = contributor_file(target, conjugate, orcid);
            let path = root.join(&relative);
            expected_files.insert(relative.clone());
            if !path.is_file() {
                problems
                    .configurations
                    .push(format!("{}: file does not exist", relative));
                continue;
            }

            let text = read_text(&path)?;
            match ConfigurationTable::parse(&text) {
                Ok(file_table) => {
                    let expected: Vec<&Reagent<'_>> = members
                        .iter()
                        .copied()
                        .filter(|row| {
                            split_multi(cell(row, columns::AGREE))
                                .into_iter()
                                .chain(split_multi(cell(row, columns::DISAGREE)))
                                .any(|o| &o == orcid)
                        })
                        .collect();
                    problems.configurations.extend(compare_configurations(
                        &relative,
                        &file_table,
                        &expected,
                        &compared,
                    ));
                }
                Err(reason) => problems
                    .configurations
                    .push(format!("{}: {}", relative, reason)),
            }
            contents.push(text);
        }

        if contents.is_empty() {
            continue;
        }
        for row in &members {
            let files = split_list(cell(row, columns::IMAGE_FILES));
            let captions = split_list(cell(row, columns::CAPTIONS));
            for (file, caption) in files.iter().zip(&captions) {
                let name = file_name(file);
                let encoded = name.replace(' ', "%20");
                let shown = contents.iter().any(|text| {
                    (text.contains(&name) || text.contains(&encoded))
                        && text.contains(caption.as_str())
                });
                if !shown {
                    problems.images.push(format!(
                        "row {}: image '{}' with caption '{}' is not shown in {}",
                        row.number,
                        name,
                        caption,
                        dir_name(target, conjugate)
                    ));
                }
            }
        }
    }

    if root.is_dir() {
        for key in markdown_files(root)?.keys() {
            if !expected_files.contains(key) {
                problems
                    .superfluous
                    .push(format!("'{}' belongs to no configuration", key));
            }
        }
    }
    Ok(problems)
}

#[derive(Default)]
struct ImageProblems {
    counts: Vec<String>,
    missing: Vec<String>,
    checksums: Vec<String>,
    unlisted: Vec<String>,
}

fn check_images(
    rows: &[Reagent<'_>],
    root: &Path,
    options: &ValidationOptions,
) -> Result<ImageProblems> {
    let mut problems = ImageProblems::default();
    let mut listed = BTreeSet::new();

    for row in rows {
        let files = split_list(cell(row, columns::IMAGE_FILES));
        let captions = split_list(cell(row, columns::CAPTIONS));
        let hashes = split_list(cell(row, columns::MD5));
        if files.len() != captions.len() || files.len() != hashes.len() {
            problems.counts.push(format!(
                "row {}: {} image file(s), {} caption(s), {} MD5 hash(es)",
                row.number,
                files.len(),
                captions.len(),
                hashes.len()
            ));
        }

        for (i, file) in files.iter().enumerate().filter(|(_, f)| !f.is_empty()) {
            let key = normalize_key(file);
            let path = root.join(&key);
            listed.insert(key);
            if !path.is_file() {
                problems
                    .missing
                    .push(format!("row {}: '{}' does not exist", row.number, file));
                continue;
            }
            if let Some(expected) = hashes.get(i) {
                let actual = md5_hex(&path)?;
                if !actual.eq_ignore_ascii_case(expected.trim()) {
                    problems.checksums.push(format!(
                        "row {}: '{}' has MD5 {}, listed as {}",
                        row.number, file, actual, expected
                    ));
                }
            }
        }
    }

    if root.is_dir() {
        for path in list_files(root)? {
            let ignored = path
                .file_name()
                .map(|n| n.to_string_lossy())
                .map_or(false, |n| options.ignored_files.iter().any(|i| *i == n));
            if is_markdown(&path) || ignored {
                continue;
            }
            let key = relative_key(root, &path);
            if !listed.contains(&key) {
                problems
                    .unlisted
                    .push(format!("'{}' is not listed in any row", key));
            }
        }
    }
    Ok(problems)
}

/// Run every reagent check and add the results to `report`.
///
/// All checks run even when earlier ones fail. Missing structural columns,
/// unreadable files and invalid patterns in the config are fatal.
pub fn validate_reagents(
    inputs: &ReagentInputs<'_>,
    options: &ValidationOptions,
    report: &mut ValidationReport,
) -> Result<()> {
    let table = inputs.reagents;
    table.require_columns(&REQUIRED_COLUMNS)?;
    inputs.vendors.require_columns(&[columns::VENDOR_NAME])?;
    let root = inputs.supporting_root;

    report.add_problems("Empty cells are marked NA", empty_cell_problems(table));
    validate_table(table, &reagent_config(inputs), report)?;

    let rows = table.records();
    report.add_problems("No duplicate configurations", duplicate_rows(table, &rows));
    report.add_problems(
        "Contributor is listed in Agree or Disagree",
        contributor_not_listed(&rows),
    );
    report.add_problems(
        format!(
            "At most {} ORCIDs per Agree/Disagree cell",
            options.max_orcid_entries
        ),
        too_many_orcids(&rows, options.max_orcid_entries),
    );
    report.add_problems(
        "No ORCID both agrees and disagrees",
        agree_and_disagree(&rows),
    );

    let absent_root = if root.is_dir() {
        Vec::new()
    } else {
        log::warn!("Supporting material directory {} does not exist", root.display());
        vec![format!("{} does not exist", root.display())]
    };
    report.add_remarks("Supporting material directory exists", absent_root);
    let supporting = check_supporting_material(table, &rows, root)?;
    report.add_problems(
        "Supporting material matches configurations",
        supporting.configurations,
    );
    report.add_problems("Images are shown in supporting material", supporting.images);
    report.add_problems("No superfluous supporting files", supporting.superfluous);

    let images = check_images(&rows, root, options)?;
    report.add_problems("Image, caption and MD5 counts match", images.counts);
    report.add_problems("Image files exist", images.missing);
    report.add_problems("Image MD5 hashes match", images.checksums);
    report.add_problems("No unlisted image files", images.unlisted);

    log::info!(
        "Validated {} reagent row(s): {} of {} check(s) failed",
        rows.len(),
        report.failure_count(),
        report.checks.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::report::CheckStatus;
    use tempfile::tempdir;

    const A: &str = "0000-0002-1825-0097";
    const B: &str = "0000-0001-5109-3700";

    const ZENODO: &str = r#"{"creators": [
        {"name": "Carberry, Josiah", "orcid": "0000-0002-1825-0097"},
        {"name": "Doe, Jane", "orcid": "0000-0001-5109-3700"}
    ]}"#;

    const VENDORS: &str = "Vendor,URL\nAcme,https://acme.example\n";

    const HEADER: &str = "Target Name / Protein Biomarker,Clone,Conjugate,Vendor,\
                          Contributor,Agree,Disagree,Image Files,Captions,MD5";

    fn supporting_file(rows: &[(&str, &str, &str, &str)], images: &str) -> String {
        let mut text = String::from(
            "# Configurations\n\n\
             | Target Name / Protein Biomarker | Clone | Conjugate | Vendor | Contributor | Agree | Disagree | Notes |\n\
             | :--- | :--- | :--- | :--- | :--- | :--- | :--- | :--- |\n",
        );
        for &(clone, contributor, agree, disagree) in rows {
            let linked = |cell: &str| {
                split_multi(cell)
                    .iter()
                    .map(|o| format!("[{o}](https://orcid.org/{o})"))
                    .collect::<Vec<_>>()
                    .join("; ")
            };
            let or_na = |s: String| if s.is_empty() { NA.to_string() } else { s };
            text.push_str(&format!(
                "| CD20 | {} | AF488 | Acme | {} | {} | {} |  |\n",
                clone,
                or_na(linked(contributor)),
                or_na(linked(agree)),
                or_na(linked(disagree)),
            ));
        }
        text.push_str("\n# Publications\n\n");
        text.push_str(images);
        text
    }

    struct Fixture {
        dir: tempfile::TempDir,
        reagents: Table,
    }

    impl Fixture {
        fn new(csv_rows: &str) -> Self {
            let dir = tempdir().unwrap();
            let csv = format!("{}\n{}", HEADER, csv_rows);
            let reagents = Table::from_reader("reagent_resources.csv", csv.as_bytes()).unwrap();
            Self { dir, reagents }
        }

        fn write(&self, relative: &str, contents: &[u8]) {
            let path = self.dir.path().join(relative);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, contents).unwrap();
        }

        fn validate(&self) -> ValidationReport {
            self.validate_at(self.dir.path())
        }

        fn validate_at(&self, supporting_root: &Path) -> ValidationReport {
            let zenodo = ZenodoMetadata::from_str(".zenodo.json", ZENODO).unwrap();
            let vendors = Table::from_reader("vendors.csv", VENDORS.as_bytes()).unwrap();
            let config = BasicConfig::default();
            let inputs = ReagentInputs {
                reagents: &self.reagents,
                config: &config,
                zenodo: &zenodo,
                vendors: &vendors,
                supporting_root,
            };
            let mut report =
                ValidationReport::new("Reagent Validation Report", "reagent_resources.csv");
            validate_reagents(&inputs, &ValidationOptions::default(), &mut report).unwrap();
            report
        }
    }

    fn failed(report: &ValidationReport) -> Vec<&str> {
        report
            .checks
            .iter()
            .filter(|c| matches!(c.status, CheckStatus::Failed(_)))
            .map(|c| c.name.as_str())
            .collect()
    }

    fn message<'r>(report: &'r ValidationReport, name: &str) -> &'r str {
        match &report.check(name).unwrap().status {
            CheckStatus::Failed(msg) => msg.as_str(),
            other => panic!("{} did not fail: {:?}", name, other),
        }
    }

    fn consistent_fixture() -> Fixture {
        let png = b"not really a png";
        let md5 = {
            let dir = tempdir().unwrap();
            let path = dir.path().join("x");
            std::fs::write(&path, png).unwrap();
            md5_hex(&path).unwrap()
        };
        let fixture = Fixture::new(&format!(
            "CD20,L26,AF488,Acme,{A},{A};{B},NA,CD20_AF488/tonsil.png,Tonsil,{md5}\n\
             CD20,H1,AF488,Acme,{B},{B},NA,NA,NA,NA\n"
        ));
        fixture.write("CD20_AF488/tonsil.png", png);
        let (ab, ba) = (format!("{A};{B}"), format!("{B};{A}"));
        fixture.write(
            &format!("CD20_AF488/{A}.md"),
            supporting_file(&[("L26", A, ab.as_str(), "NA")], "![Tonsil](tonsil.png)").as_bytes(),
        );
        fixture.write(
            &format!("CD20_AF488/{B}.md"),
            supporting_file(
                &[("L26", A, ba.as_str(), "NA"), ("H1", B, B, "NA")],
                "![Tonsil](tonsil.png)",
            )
            .as_bytes(),
        );
        fixture.write(".DS_Store", b"");
        fixture
    }

    #[test]
    fn test_consistent_inputs_pass() {
        let report = consistent_fixture().validate();
        assert!(!report.has_failures(), "{}", report);
    }

    #[test]
    fn test_missing_supporting_directory_warns() {
        let fixture = Fixture::new(&format!("CD20,L26,AF488,Acme,{A},{A},NA,NA,NA,NA\n"));
        let missing = fixture.dir.path().join("supporting_material");
        let report = fixture.validate_at(&missing);

        assert!(matches!(
            report.check("Supporting material directory exists").unwrap().status,
            CheckStatus::Warning(ref msg) if msg.ends_with("does not exist")
        ));
        assert_eq!(
            failed(&report),
            vec!["Supporting material matches configurations"]
        );
        assert_eq!(
            consistent_fixture()
                .validate()
                .check("Supporting material directory exists")
                .unwrap()
                .status,
            CheckStatus::Ok
        );
    }

    #[test]
    fn test_row_level_problems_are_all_reported() {
        let fixture = Fixture::new(&format!(
            "CD20,L26,AF488,Initech,{A},{B},{B},NA,NA,NA\n\
             CD20,L26,AF488,Acme,{B},{B},NA,NA,NA,\n\
             CD3,,AF647,Acme,0000-0003-4379-8967,NA,NA,NA,NA,NA\n"
        ));
        let report = fixture.validate();
        let failed = failed(&report);

        assert!(failed.contains(&"Empty cells are marked NA"));
        assert_eq!(
            message(&report, "Empty cells are marked NA"),
            "'Clone' is empty in row 4; 'MD5' is empty in row 3"
        );
        assert_eq!(
            message(&report, "Allowed values in 'Vendor'"),
            "row 2: 'Initech' is not an allowed value"
        );
        assert_eq!(
            message(&report, "Allowed values in 'Contributor'"),
            "row 4: '0000-0003-4379-8967' is not an allowed value"
        );
        assert_eq!(
            message(&report, "Contributor is listed in Agree or Disagree"),
            "row 2: '0000-0002-1825-0097'; row 4: '0000-0003-4379-8967'"
        );
        assert_eq!(
            message(&report, "No ORCID both agrees and disagrees"),
            "row 2: '0000-0001-5109-3700'"
        );
        assert!(failed.contains(&"Supporting material matches configurations"));
    }

    #[test]
    fn test_duplicates_ignore_contributor_columns() {
        let fixture = Fixture::new(&format!(
            "CD20,L26,AF488,Acme,{A},{A},NA,NA,NA,NA\n\
             CD20,L26,AF488,Acme,{B},{B},NA,NA,NA,NA\n"
        ));
        let report = fixture.validate();
        assert_eq!(
            message(&report, "No duplicate configurations"),
            "rows 2, 3 describe the same configuration"
        );
    }

    #[test]
    fn test_supporting_file_mismatch_and_leftovers() {
        let fixture = consistent_fixture();
        fixture.write(
            &format!("CD20_AF488/{B}.md"),
            supporting_file(&[("H1", B, B, "NA")], "![Tonsil](tonsil.png)").as_bytes(),
        );
        fixture.write("Old_Pair/0000-0002-1825-0097.md", b"# Configurations");
        fixture.write("CD20_AF488/stray.png", b"x");

        let report = fixture.validate();
        assert_eq!(
            message(&report, "Supporting material matches configurations"),
            "CD20_AF488/0000-0001-5109-3700.md: configuration of row 2 is not listed"
        );
        assert_eq!(
            message(&report, "No superfluous supporting files"),
            "'Old_Pair/0000-0002-1825-0097.md' belongs to no configuration"
        );
        assert_eq!(
            message(&report, "No unlisted image files"),
            "'CD20_AF488/stray.png' is not listed in any row"
        );
    }

    #[test]
    fn test_image_checks() {
        let fixture = consistent_fixture();
        fixture.write("CD20_AF488/tonsil.png", b"changed contents");
        let (ab, ba) = (format!("{A};{B}"), format!("{B};{A}"));
        fixture.write(
            &format!("CD20_AF488/{A}.md"),
            supporting_file(&[("L26", A, ab.as_str(), "NA")], "no images").as_bytes(),
        );
        fixture.write(
            &format!("CD20_AF488/{B}.md"),
            supporting_file(
                &[("L26", A, ba.as_str(), "NA"), ("H1", B, B, "NA")],
                "no images",
            )
            .as_bytes(),
        );

        let report = fixture.validate();
        assert_eq!(
            failed(&report),
            vec!["Images are shown in supporting material", "Image MD5 hashes match"]
        );
        assert!(message(&report, "Images are shown in supporting material")
            .starts_with("row 2: image 'tonsil.png' with caption 'Tonsil'"));
    }

    #[test]
    fn test_too_many_orcids() {
        let rows: Vec<Reagent<'_>> = Vec::new();
        assert!(too_many_orcids(&rows, 5).is_empty());

        let csv = format!("{HEADER}\nCD20,L26,AF488,Acme,{A},{A};{B};{A},NA,NA,NA,NA\n");
        let table = Table::from_reader("r.csv", csv.as_bytes()).unwrap();
        assert_eq!(
            too_many_orcids(&table.records(), 2),
            vec!["row 2: Agree lists 3 ORCIDs"]
        );
    }
}
