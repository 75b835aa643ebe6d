//! Landing page statistics derived from the reagent table.

use std::collections::BTreeSet;

use crate::error::Result;
use crate::generators::Page;
use crate::markdown::Template;
use crate::records::Reagent;
use crate::table::{is_na, split_multi, Row};

/// Knowledge-base size figures
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Reagent rows
    pub reagents: usize,
    /// Distinct targets
    pub targets: usize,
    /// Distinct target/conjugate pairs
    pub conjugates: usize,
    /// Distinct ORCIDs over the Contributor, Agree and Disagree columns
    pub contributors: usize,
    /// Distinct vendors, `NA` excluded
    pub vendors: usize,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl Stats {
    /// Count the figures for `reagents`
    pub fn collect(reagents: &[Row<Reagent>]) -> Self {
        let mut targets = BTreeSet::new();
        let mut pairs = BTreeSet::new();
        let mut orcids = BTreeSet::new();
        let mut vendors = BTreeSet::new();

        for reagent in reagents.iter().map(|row| &row.record) {
            let target = present(&reagent.target);
            if let Some(target) = target {
                targets.insert(target);
            }
            pairs.insert((target, present(&reagent.conjugate)));
            for cell in [&reagent.contributor, &reagent.agree, &reagent.disagree] {
                orcids.extend(cell.as_deref().map(split_multi).unwrap_or_default());
            }
            if let Some(vendor) = present(&reagent.vendor).filter(|v| !is_na(v)) {
                vendors.insert(vendor);
            }
        }

        Self {
            reagents: reagents.len(),
            targets: targets.len(),
            conjugates: pairs.len(),
            contributors: orcids.len(),
            vendors: vendors.len(),
        }
    }
}

/// Render the statistics into `template`.
///
/// The template must use every figure: `{reagent_count}`, `{target_count}`,
/// `{conjugate_count}`, `{contributor_count}` and `{vendor_count}`.
pub fn render(template: &Template, reagents: &[Row<Reagent>]) -> Result<Page> {
    let stats = Stats::collect(reagents);
    log::info!("Knowledge-base statistics: {:?}", stats);

    let values = [
        ("reagent_count", stats.reagents.to_string()),
        ("target_count", stats.targets.to_string()),
        ("conjugate_count", stats.conjugates.to_string()),
        ("contributor_count", stats.contributors.to_string()),
        ("vendor_count", stats.vendors.to_string()),
    ];
    let values: Vec<(&str, &str)> = values.iter().map(|(k, v)| (*k, v.as_str())).collect();
    Ok(Page::clean(template.render(&values)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::number_rows;

    fn reagent(target: &str, conjugate: &str, vendor: &str, agree: &str) -> Reagent {
        Reagent {
            target: Some(target.to_string()),
            conjugate: Some(conjugate.to_string()),
            vendor: Some(vendor.to_string()),
            contributor: Some("0000-0002-1825-0097".to_string()),
            agree: Some(agree.to_string()),
            disagree: Some("NA".to_string()),
            ..Reagent::default()
        }
    }

    #[test]
    fn test_counts() {
        let rows = number_rows([
            reagent("CD20", "AF488", "Acme", "0000-0002-1825-0097"),
            reagent("CD20", "AF488", "Acme", "0000-0002-1825-0097; 0000-0001-5109-3700"),
            reagent("CD20", "PE", "NA", "0000-0002-1825-0097"),
            reagent("CD3", "AF647", "Globex", "0000-0002-1694-233X"),
        ]);
        let stats = Stats::collect(&rows);
        assert_eq!(
            stats,
            Stats {
                reagents: 4,
                targets: 2,
                conjugates: 3,
                contributors: 3,
                vendors: 2,
            }
        );
    }

    #[test]
    fn test_render_requires_every_figure() {
        let rows = number_rows([reagent("CD20", "AF488", "Acme", "NA")]);
        let template = Template::parse(
            "index.md.in",
            "{reagent_count} reagents, {target_count} targets, {conjugate_count} conjugates, \
             {contributor_count} contributors, {vendor_count} vendors",
        )
        .unwrap();
        let page = render(&template, &rows).unwrap();
        assert_eq!(
            page.contents,
            "1 reagents, 1 targets, 1 conjugates, 1 contributors, 1 vendors"
        );

        let partial = Template::parse("index.md.in", "{reagent_count}").unwrap();
        assert!(render(&partial, &rows).is_err());
    }
}
