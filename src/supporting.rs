//! # Supporting material layout
//!
//! Every reagent target/conjugate pair has a directory below the supporting
//! material root, holding one Markdown file per contributor ORCID plus the
//! images those files show:
//!
//! ```text
//! supporting_material/
//! ├── CD20_AF488/
//! │   ├── 0000-0002-1825-0097.md
//! │   └── cd20_tonsil.png
//! └── Granzyme_B_Unconjugated/
//!     └── 0000-0001-5109-3700.md
//! ```
//!
//! A contributor file repeats the reagent configurations it covers in a table
//! between the [`CONFIGURATIONS_HEADING`] and [`PUBLICATIONS_HEADING`]
//! headings. [`ConfigurationTable::parse`] reads that table back for
//! consistency checks.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::files::{list_files, relative_key};
use crate::lookup::LookupTable;

/// Heading that opens the configuration table
pub const CONFIGURATIONS_HEADING: &str = "# Configurations";

/// Heading that follows the configuration table
pub const PUBLICATIONS_HEADING: &str = "# Publications";

/// Free text column present only in supporting files
pub const NOTES_COLUMN: &str = "Notes";

/// Characters replaced by `_` in directory names. Some are invalid in file
/// paths on common platforms, the rest break static-site links.
pub const INVALID_PATH_CHARS: [char; 14] = [
    ' ', '\t', '/', '\\', '{', '}', '[', ']', '(', ')', '<', '>', ':', '&',
];

/// Directory name of a target/conjugate pair
pub fn dir_name(target: &str, conjugate: &str) -> String {
    format!("{}_{}", target.trim(), conjugate.trim())
        .chars()
        .map(|c| if INVALID_PATH_CHARS.contains(&c) { '_' } else { c })
        .collect()
}

/// Relative path (with `/`) of a contributor file
pub fn contributor_file(target: &str, conjugate: &str, orcid: &str) -> String {
    format!("{}/{}.md", dir_name(target, conjugate), orcid.trim())
}

/// Index every `.md` file below `root` by its relative path.
pub fn markdown_files(root: &Path) -> Result<LookupTable<PathBuf>> {
    let files = list_files(root)?
        .into_iter()
        .filter(|p| is_markdown(p))
        .collect::<Vec<_>>();
    log::debug!(
        "Found {} supporting markdown file(s) below {}",
        files.len(),
        root.display()
    );
    Ok(LookupTable::build("supporting material", files, |p| {
        Some(relative_key(root, p))
    }))
}

/// True for `.md` files
pub fn is_markdown(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == "md")
}

/// The configuration table of a contributor file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationTable {
    /// Column names
    pub columns: Vec<String>,
    /// Body rows, one cell per column
    pub rows: Vec<Vec<String>>,
}

impl ConfigurationTable {
    /// Extract the table between the configuration and publication headings.
    ///
    /// Blank lines are ignored and every line is trimmed. The error describes
    /// what is structurally wrong with the file.
    pub fn parse(content: &str) -> std::result::Result<Self, String> {
        let lines: Vec<&str> = content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();

        let start = lines
            .iter()
            .position(|l| *l == CONFIGURATIONS_HEADING)
            .ok_or_else(|| format!("missing '{}' section", CONFIGURATIONS_HEADING))?;
        let end = lines
            .iter()
            .position(|l| *l == PUBLICATIONS_HEADING)
            .ok_or_else(|| format!("missing '{}' section", PUBLICATIONS_HEADING))?;
        if end < start + 3 {
            return Err("configuration table header is incomplete".to_string());
        }

        let columns: Vec<String> = split_row(lines[start + 1])
            .into_iter()
            .filter(|c| !c.is_empty())
            .collect();

        let mut rows = Vec::new();
        for line in &lines[start + 3..end] {
            let mut cells = split_row(line);
            // Leading and trailing pipes produce empty border cells
            if cells.len() >= 2 {
                cells.remove(0);
                cells.pop();
            }
            if cells.len() != columns.len() {
                return Err(format!(
                    "configuration row has {} cells, expected {}: {}",
                    cells.len(),
                    columns.len(),
                    line
                ));
            }
            rows.push(cells);
        }

        Ok(Self { columns, rows })
    }

    /// Position of a column
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }
}

/// Split a table line on unescaped `|`, unescaping `\|` inside cells.
fn split_row(line: &str) -> Vec<String> {
    let mut cells = vec![String::new()];
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'|') => {
                chars.next();
                if let Some(cell) = cells.last_mut() {
                    cell.push('|');
                }
            }
            '|' => cells.push(String::new()),
            c => {
                if let Some(cell) = cells.last_mut() {
                    cell.push(c);
                }
            }
        }
    }
    cells.into_iter().map(|c| c.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_dir_name_replaces_invalid_characters() {
        assert_eq!(dir_name("Granzyme B", "Unconjugated"), "Granzyme_B_Unconjugated");
        assert_eq!(dir_name("CD3/CD28 (human)", "A&B"), "CD3_CD28__human__A_B");
        assert_eq!(
            contributor_file("CD20", "AF488", "0000-0002-1825-0097"),
            "CD20_AF488/0000-0002-1825-0097.md"
        );
    }

    #[test]
    fn test_parse_configuration_table() {
        let content = "\
---
title: CD20 AF488
---

# Configurations

| Clone | Agree | Notes |
| :--- | :--- | :--- |
| L26 | [0000-0002-1825-0097](https://orcid.org/0000-0002-1825-0097) |  |
| a\\|b | NA | n |

# Publications

none
";
        let table = ConfigurationTable::parse(content).unwrap();
        assert_eq!(table.columns, vec!["Clone", "Agree", "Notes"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][0], "L26");
        assert_eq!(table.rows[0][2], "");
        assert_eq!(table.rows[1][0], "a|b");
        assert_eq!(table.column_index("Notes"), Some(2));
    }

    #[test]
    fn test_parse_reports_structure_problems() {
        assert!(ConfigurationTable::parse("# Publications")
            .unwrap_err()
            .contains("Configurations"));
        let err = ConfigurationTable::parse(
            "# Configurations\n| A | B |\n| :--- | :--- |\n| 1 |\n# Publications\n",
        )
        .unwrap_err();
        assert!(err.contains("expected 2"));
    }

    #[test]
    fn test_markdown_files_indexed_by_relative_path() {
        let dir = tempdir().unwrap();
        let pair = dir.path().join("CD20_AF488");
        std::fs::create_dir_all(&pair).unwrap();
        std::fs::write(pair.join("0000-0002-1825-0097.md"), "x").unwrap();
        std::fs::write(pair.join("image.png"), "x").unwrap();

        let files = markdown_files(dir.path()).unwrap();
        assert_eq!(
            files.keys().collect::<Vec<_>>(),
            vec!["CD20_AF488/0000-0002-1825-0097.md"]
        );
    }
}
