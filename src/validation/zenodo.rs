//! Checks on the `.zenodo.json` creators list.

use std::collections::BTreeMap;

use crate::orcid;
use crate::validation::report::ValidationReport;
use crate::zenodo::{Creator, ZenodoMetadata};

/// Values that occur more than once, with the 1-based creator positions
fn repeated<'a>(values: impl Iterator<Item = (usize, &'a str)>) -> Vec<String> {
    let mut seen: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (position, value) in values {
        seen.entry(value).or_default().push(position);
    }
    seen.into_iter()
        .filter(|(_, positions)| positions.len() > 1)
        .map(|(value, positions)| {
            let positions: Vec<String> = positions.iter().map(|p| p.to_string()).collect();
            format!("'{}' repeats in creators {}", value, positions.join(", "))
        })
        .collect()
}

/// Add the creator checks to `report`.
///
/// Creators are referred to by their position in the export, starting at 1.
pub fn validate_zenodo(metadata: &ZenodoMetadata, report: &mut ValidationReport) {
    let creators: Vec<(usize, &Creator)> = metadata
        .creators
        .iter()
        .enumerate()
        .map(|(i, c)| (i + 1, c))
        .collect();

    let none = if creators.is_empty() {
        vec!["the creators list is empty".to_string()]
    } else {
        Vec::new()
    };
    report.add_remarks("Creators listed", none);

    let mut without = Vec::new();
    let mut malformed = Vec::new();
    let mut bad_checksum = Vec::new();
    for (position, creator) in &creators {
        match creator.orcid() {
            None => without.push(format!("creator {} ({})", position, creator.name.trim())),
            Some(id) if !orcid::is_well_formed(id) => {
                malformed.push(format!("creator {} ({}): '{}'", position, creator.name.trim(), id))
            }
            Some(id) if !orcid::has_valid_checksum(id) => bad_checksum.push(format!(
                "creator {} ({}): '{}'",
                position,
                creator.name.trim(),
                id
            )),
            Some(_) => {}
        }
    }
    report.add_problems("Every creator has an ORCID", without);
    report.add_problems("ORCIDs are well formed", malformed);
    report.add_problems("ORCID check digits", bad_checksum);

    report.add_problems(
        "Unique ORCIDs",
        repeated(creators.iter().filter_map(|(p, c)| c.orcid().map(|o| (*p, o)))),
    );
    report.add_problems(
        "Unique names",
        repeated(creators.iter().map(|(p, c)| (*p, c.name.trim()))),
    );

    log::info!(
        "Validated {} creator(s): {} check(s) failed",
        creators.len(),
        report.failure_count()
    );
}
