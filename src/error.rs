//! Crate-wide error type for inputs that cannot be processed at all.

use std::path::PathBuf;

use crate::bibtex::BibError;
use crate::markdown::TemplateError;

/// Fatal errors: input files that cannot be read or parsed at all.
///
/// Row-level problems (unresolved references, missing values) are not fatal
/// and are reported through [`crate::linker::LinkReport`] or
/// [`crate::validation::ValidationReport`] instead.
#[derive(Debug, thiserror::Error)]
pub enum KbError {
    /// I/O error reading or writing a file
    #[error("Failed to access {}: {source}", path.display())]
    Io {
        /// File that could not be accessed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// CSV parsing error
    #[error("CSV parsing error in {table}: {source}")]
    Csv {
        /// Name of the table being parsed
        table: String,
        /// Underlying CSV error
        #[source]
        source: csv::Error,
    },

    /// JSON parsing error
    #[error("JSON parsing error in {name}: {source}")]
    Json {
        /// Name of the JSON document
        name: String,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Required header columns are absent from a table
    #[error("Missing required column(s) in {table}: {}", columns.join(", "))]
    MissingColumns {
        /// Name of the table
        table: String,
        /// Columns that were expected but not found
        columns: Vec<String>,
    },

    /// A regular expression supplied in a validation config does not compile
    #[error("Invalid regular expression for column '{column}': {source}")]
    InvalidPattern {
        /// Column the pattern applies to
        column: String,
        /// Underlying regex error
        #[source]
        source: regex::Error,
    },

    /// Malformed Markdown template
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// Malformed BibTeX file
    #[error(transparent)]
    Bibtex(#[from] BibError),
}

impl KbError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for fallible library operations
pub type Result<T> = std::result::Result<T, KbError>;
