//! # Input validation
//!
//! Validators never stop at the first problem. Every check is run and its
//! result recorded in a [`ValidationReport`], with the failure message listing
//! every offending row, so contributors can fix a submission in one pass.
//!
//! Only structural problems that make the remaining checks meaningless (an
//! unreadable file, a missing key column, an invalid pattern in a config) are
//! returned as [`KbError`](crate::error::KbError).

mod basic;
mod reagents;
mod report;
mod zenodo;

pub use basic::{validate_table, BasicConfig};
pub use reagents::{validate_reagents, ReagentInputs, REQUIRED_COLUMNS};
pub use report::{CheckStatus, ValidationCheck, ValidationReport};
pub use zenodo::validate_zenodo;
