//! # kbmd - Knowledge-Base Markdown Generator
//!
//! `kbmd` turns the curated tables of an imaging knowledge base into the
//! Markdown pages of its static website, and validates those tables before
//! they are published.
//!
//! ## Inputs
//!
//! - **CSV tables**: reagent resources, vendors, fluorescent probes, protocols,
//!   videos, datasets, software, the data dictionary and the glossary. Cells
//!   are kept as text; the literal `NA` marks an intentionally empty cell.
//! - **BibTeX**: the publication list.
//! - **`.zenodo.json`**: the contributor list with ORCIDs.
//! - **Supporting material**: one directory per reagent target/conjugate pair
//!   holding a Markdown file per contributor plus the images those files show.
//!
//! ## Generating a page
//!
//! Every generator takes loaded inputs, a [`Template`](markdown::Template) and
//! [`Options`], and returns a [`Page`](generators::Page). Rows that cannot be
//! rendered (an unknown vendor, a missing supporting file, a malformed ORCID)
//! never abort the run: they are collected in the page's
//! [`LinkReport`](linker::LinkReport) so a single run lists every problem.
//!
//! ```rust,no_run
//! use std::path::Path;
//! use kbmd::generators::protocols;
//! use kbmd::markdown::Template;
//! use kbmd::records::Protocol;
//! use kbmd::table::read_records;
//! use kbmd::Options;
//!
//! let template = Template::from_path(Path::new("protocols.md.in"))?;
//! let rows = read_records::<Protocol>(Path::new("protocols.csv"))?;
//! let page = protocols::render(&template, &rows, &Options::default())?;
//!
//! if !page.is_clean() {
//!     eprintln!("{}", page.report);
//! }
//! # Ok::<(), kbmd::KbError>(())
//! ```
//!
//! ## Validating inputs
//!
//! The [`validation`] module runs every check and collects the results in a
//! [`ValidationReport`](validation::ValidationReport), listing each offending
//! row rather than stopping at the first one.
//!
//! ## Modules
//!
//! - [`table`], [`lookup`], [`records`]: loading tables and resolving references
//! - [`linker`]: row to fragment rendering with error collection
//! - [`markdown`]: pipe tables, links and `.md.in` templates
//! - [`generators`]: one module per website page
//! - [`bibtex`], [`zenodo`], [`orcid`]: the non-CSV inputs
//! - [`supporting`]: supporting material layout and parsing
//! - [`validation`]: input checks

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod bibtex;
pub mod error;
pub mod files;
pub mod generators;
pub mod linker;
pub mod lookup;
pub mod markdown;
pub mod options;
pub mod orcid;
pub mod records;
pub mod supporting;
pub mod table;
pub mod validation;
pub mod zenodo;

pub use error::{KbError, Result};
pub use options::Options;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::error::{KbError, Result};
    pub use crate::generators::Page;
    pub use crate::linker::{LinkError, LinkOptions, LinkReport, Strictness};
    pub use crate::lookup::LookupTable;
    pub use crate::markdown::{MarkdownTable, Template};
    pub use crate::options::{LinkBases, Options, ValidationOptions};
    pub use crate::table::{Row, Table, NA};
    pub use crate::validation::{ValidationCheck, ValidationReport};
}
