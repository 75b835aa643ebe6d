use std::fmt;

/// A row-level problem found while linking a table.
///
/// Unlike [`crate::KbError`] these never abort a run: every row is processed
/// and all problems are reported together.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LinkError {
    /// A foreign key did not resolve to exactly one lookup entry
    #[error("row {row} ({id}): '{key}' in column '{column}' does not resolve in {table}: {reason}")]
    Resolution {
        /// Row number of the offending row
        row: usize,
        /// Identifier of the offending row
        id: String,
        /// Column holding the foreign key
        column: String,
        /// Lookup table the key was resolved against
        table: String,
        /// The unresolved key
        key: String,
        /// Why resolution failed
        reason: String,
    },

    /// A required value is missing, empty or malformed
    #[error("row {row} ({id}): column '{column}' {reason}")]
    Format {
        /// Row number of the offending row
        row: usize,
        /// Identifier of the offending row
        id: String,
        /// Offending column
        column: String,
        /// What is wrong with the value
        reason: String,
    },
}

impl LinkError {
    /// Row number of the offending row
    pub fn row(&self) -> usize {
        match self {
            LinkError::Resolution { row, .. } | LinkError::Format { row, .. } => *row,
        }
    }

    /// Identifier of the offending row
    pub fn id(&self) -> &str {
        match self {
            LinkError::Resolution { id, .. } | LinkError::Format { id, .. } => id,
        }
    }

    /// True for [`LinkError::Resolution`]
    pub fn is_resolution(&self) -> bool {
        matches!(self, LinkError::Resolution { .. })
    }
}

/// Every row-level problem of a run, in row order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkReport {
    errors: Vec<LinkError>,
}

impl LinkReport {
    /// Create a report from collected errors
    pub fn new(errors: Vec<LinkError>) -> Self {
        Self { errors }
    }

    /// True when no problems were found
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of problems
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// All problems
    pub fn errors(&self) -> &[LinkError] {
        &self.errors
    }

    /// Append the problems of another report (e.g. a second table of the same page)
    pub fn merge(&mut self, other: LinkReport) {
        self.errors.extend(other.errors);
    }

    /// Append one problem
    pub fn push(&mut self, error: LinkError) {
        self.errors.push(error);
    }
}

impl fmt::Display for LinkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} problem(s) found:", self.errors.len())?;
        for error in &self.errors {
            writeln!(f, "  {}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for LinkReport {}
