//! # Typed knowledge-base records
//!
//! Tables with a fixed set of columns are deserialized into these structs
//! rather than accessed by column name. Every field is optional: a missing
//! column or a blank cell is a row-level problem reported by the generator,
//! not a reason to reject the whole file.

mod catalog;
mod glossary;
mod reagent;

pub use catalog::{Dataset, Protocol, Software, Video};
pub use glossary::{DictionaryEntry, GlossaryTerm};
pub use reagent::{columns, Reagent, Vendor};
