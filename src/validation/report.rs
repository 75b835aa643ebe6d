//! Check results collected by the validators.
//!
//! A failed check fails the run. A warning is printed but leaves the run
//! passing; it marks inputs that are legal but probably not what the
//! contributor meant, such as a table without data rows.

use std::fmt;

#[cfg(feature = "colorized_output")]
use console::style;

/// Outcome of one check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    /// Nothing to report
    Ok,
    /// Passed, with a remark
    Warning(String),
    /// Failed; the message lists every offending entry
    Failed(String),
}

impl CheckStatus {
    fn is_ok(&self) -> bool {
        matches!(self, CheckStatus::Ok)
    }

    fn is_warning(&self) -> bool {
        matches!(self, CheckStatus::Warning(_))
    }

    fn is_failed(&self) -> bool {
        matches!(self, CheckStatus::Failed(_))
    }

    fn symbol(&self) -> &'static str {
        match self {
            CheckStatus::Ok => "✓",
            CheckStatus::Warning(_) => "⚠",
            CheckStatus::Failed(_) => "✗",
        }
    }

    /// `(label, message)` for statuses that carry a message
    fn detail(&self) -> Option<(&'static str, &str)> {
        match self {
            CheckStatus::Ok => None,
            CheckStatus::Warning(msg) => Some(("WARNING", msg)),
            CheckStatus::Failed(msg) => Some(("FAILED", msg)),
        }
    }
}

/// A named check and its outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationCheck {
    /// What was checked
    pub name: String,
    /// Outcome
    pub status: CheckStatus,
}

impl ValidationCheck {
    /// Passed check
    pub fn ok(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Ok,
        }
    }

    /// Failed check
    pub fn failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Failed(message.into()),
        }
    }

    /// Passed when `problems` is empty, otherwise failed listing all of them
    pub fn from_problems(name: impl Into<String>, problems: Vec<String>) -> Self {
        Self::from_entries(name, problems, CheckStatus::Failed)
    }

    /// Passed when `remarks` is empty, otherwise a warning listing all of them
    pub fn from_remarks(name: impl Into<String>, remarks: Vec<String>) -> Self {
        Self::from_entries(name, remarks, CheckStatus::Warning)
    }

    fn from_entries(
        name: impl Into<String>,
        entries: Vec<String>,
        status: fn(String) -> CheckStatus,
    ) -> Self {
        let status = if entries.is_empty() {
            CheckStatus::Ok
        } else {
            status(entries.join("; "))
        };
        Self {
            name: name.into(),
            status,
        }
    }
}

/// Every check run against one input
#[derive(Debug, Clone)]
pub struct ValidationReport {
    /// Heading, e.g. `Zenodo Validation Report`
    pub title: String,
    /// Checks in the order they ran
    pub checks: Vec<ValidationCheck>,
    /// Input the checks ran against
    pub file_path: String,
}

impl ValidationReport {
    /// Empty report for `file_path`
    pub fn new(title: impl Into<String>, file_path: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            checks: Vec::new(),
            file_path: file_path.into(),
        }
    }

    /// Record a check
    pub fn add_check(&mut self, check: ValidationCheck) {
        match check.status.detail() {
            Some((label, msg)) => log::debug!("{}: {}: {}", label, check.name, msg),
            None => log::debug!("Passed: {}", check.name),
        }
        self.checks.push(check);
    }

    /// Record a check that fails with every entry of `problems`
    pub fn add_problems(&mut self, name: impl Into<String>, problems: Vec<String>) {
        self.add_check(ValidationCheck::from_problems(name, problems));
    }

    /// Record a check that warns with every entry of `remarks`
    pub fn add_remarks(&mut self, name: impl Into<String>, remarks: Vec<String>) {
        self.add_check(ValidationCheck::from_remarks(name, remarks));
    }

    /// True when any check failed
    pub fn has_failures(&self) -> bool {
        self.checks.iter().any(|c| c.status.is_failed())
    }

    /// True when any check warned
    pub fn has_warnings(&self) -> bool {
        self.checks.iter().any(|c| c.status.is_warning())
    }

    /// Number of passed checks
    pub fn success_count(&self) -> usize {
        self.checks.iter().filter(|c| c.status.is_ok()).count()
    }

    /// Number of warnings
    pub fn warning_count(&self) -> usize {
        self.checks.iter().filter(|c| c.status.is_warning()).count()
    }

    /// Number of failed checks
    pub fn failure_count(&self) -> usize {
        self.checks.iter().filter(|c| c.status.is_failed()).count()
    }

    /// Look up a check by name
    pub fn check(&self, name: &str) -> Option<&ValidationCheck> {
        self.checks.iter().find(|c| c.name == name)
    }

    fn rule(&self) -> String {
        "=".repeat(self.title.chars().count())
    }

    fn verdict(&self) -> &'static str {
        if self.has_failures() {
            "Validation FAILED"
        } else if self.has_warnings() {
            "Validation PASSED with warnings"
        } else {
            "Validation PASSED"
        }
    }

    /// The report with terminal colours, or plain when the
    /// `colorized_output` feature is off
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            fn paint<'a>(status: &CheckStatus, text: &'a str) -> console::StyledObject<&'a str> {
                match status {
                    CheckStatus::Ok => style(text).green(),
                    CheckStatus::Warning(_) => style(text).yellow(),
                    CheckStatus::Failed(_) => style(text).red(),
                }
            }

            let mut output = format!(
                "{}\n{}\n{}: {}\n\n",
                style(&self.title).bold().cyan(),
                style(self.rule()).cyan(),
                style("File").bold(),
                self.file_path
            );
            for check in &self.checks {
                let status = &check.status;
                output.push_str(&format!(
                    "[{}] {}",
                    paint(status, status.symbol()),
                    paint(status, &check.name)
                ));
                match status.detail() {
                    Some((label, msg)) => {
                        output.push_str(&format!(" - {}: {}\n", paint(status, label).bold(), msg))
                    }
                    None => output.push('\n'),
                }
            }
            output.push_str(&format!(
                "\n{}: {} passed, {} warnings, {} failed\n\n",
                style("Summary").bold(),
                style(self.success_count()).green(),
                style(self.warning_count()).yellow(),
                style(self.failure_count()).red()
            ));

            let verdict = style(self.verdict()).bold();
            let verdict = if self.has_failures() {
                verdict.red()
            } else if self.has_warnings() {
                verdict.yellow()
            } else {
                verdict.green()
            };
            output.push_str(&format!("{}\n", verdict));
            output
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            self.to_string()
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}\n{}\nFile: {}\n", self.title, self.rule(), self.file_path)?;
        for check in &self.checks {
            write!(f, "[{}] {}", check.status.symbol(), check.name)?;
            match check.status.detail() {
                Some((label, msg)) => writeln!(f, " - {}: {}", label, msg)?,
                None => writeln!(f)?,
            }
        }
        writeln!(
            f,
            "\nSummary: {} passed, {} warnings, {} failed\n",
            self.success_count(),
            self.warning_count(),
            self.failure_count()
        )?;
        writeln!(f, "{}", self.verdict())
    }
}

/// `rows 3, 5` or `row 3`
pub(crate) fn rows_phrase(rows: &[usize]) -> String {
    let list = rows
        .iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    if rows.len() == 1 {
        format!("row {}", list)
    } else {
        format!("rows {}", list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_display() {
        let mut report = ValidationReport::new("Table Validation Report", "vendors.csv");
        report.add_check(ValidationCheck::ok("Required columns"));
        report.add_remarks("Table has rows", vec!["no data rows".to_string()]);
        report.add_problems("Values of 'Vendor'", vec!["row 2: 'Initech'".to_string()]);

        assert!(report.has_failures());
        assert_eq!(
            (report.success_count(), report.warning_count(), report.failure_count()),
            (1, 1, 1)
        );

        let text = report.to_string();
        assert!(text.starts_with(
            "Table Validation Report\n=======================\nFile: vendors.csv\n\n"
        ));
        assert!(text.contains("[✓] Required columns\n"));
        assert!(text.contains("[⚠] Table has rows - WARNING: no data rows\n"));
        assert!(text.contains("[✗] Values of 'Vendor' - FAILED: row 2: 'Initech'\n"));
        assert!(text.contains("Summary: 1 passed, 1 warnings, 1 failed\n"));
        assert!(text.trim_end().ends_with("Validation FAILED"));
    }

    #[test]
    fn test_warnings_do_not_fail() {
        let mut report = ValidationReport::new("Zenodo Validation Report", ".zenodo.json");
        report.add_remarks("Creators listed", vec!["no creators".to_string()]);
        report.add_remarks("Nothing to say", vec![]);

        assert!(!report.has_failures());
        assert!(report.has_warnings());
        assert_eq!(report.success_count(), 1);
        assert!(report.to_string().trim_end().ends_with("Validation PASSED with warnings"));
    }

    #[test]
    fn test_from_problems() {
        assert_eq!(ValidationCheck::from_problems("x", vec![]).status, CheckStatus::Ok);
        assert_eq!(
            ValidationCheck::from_problems("x", vec!["a".into(), "b".into()]).status,
            CheckStatus::Failed("a; b".to_string())
        );
        assert_eq!(
            ValidationCheck::from_remarks("x", vec!["a".into()]).status,
            CheckStatus::Warning("a".to_string())
        );
        assert_eq!(rows_phrase(&[3]), "row 3");
        assert_eq!(rows_phrase(&[3, 5]), "rows 3, 5");
    }
}
