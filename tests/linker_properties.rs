//! Property tests for row linking
//!
//! Rows reference a small vendor table; some references point at vendors that
//! do not exist. Whatever the mix, linking keeps input order and accounts for
//! every row exactly once.

use kbmd::linker::{link_rows, LinkError, LinkOptions, RowContext, RowFormatter, Strictness};
use kbmd::lookup::LookupTable;
use kbmd::table::number_rows;
use proptest::prelude::*;

const KNOWN_VENDORS: usize = 5;

#[derive(Debug, Clone)]
struct Item {
    id: String,
    vendor: String,
}

struct ItemFormatter {
    vendors: LookupTable<String>,
}

impl ItemFormatter {
    fn new() -> Self {
        let vendors = LookupTable::build(
            "vendors",
            (0..KNOWN_VENDORS).map(|i| format!("V{}", i)),
            |name| Some(name.clone()),
        );
        Self { vendors }
    }
}

impl RowFormatter<Item> for ItemFormatter {
    fn row_id(&self, row: &Item) -> String {
        row.id.clone()
    }

    fn format(&self, row: &Item, cx: &mut RowContext) -> String {
        match cx.resolve(&self.vendors, "vendor_id", &row.vendor) {
            Some(vendor) => format!("{} from {}", row.id, vendor),
            None => String::new(),
        }
    }
}

fn items(vendor_indices: &[usize]) -> Vec<Item> {
    vendor_indices
        .iter()
        .enumerate()
        .map(|(i, v)| Item {
            id: format!("item-{}", i),
            vendor: format!("V{}", v),
        })
        .collect()
}

fn options(strictness: Strictness) -> LinkOptions {
    LinkOptions {
        strictness,
        ..LinkOptions::default()
    }
}

proptest! {
    /// Every row with a known vendor yields one fragment, in input order
    #[test]
    fn test_resolvable_rows_keep_order(
        indices in prop::collection::vec(0..KNOWN_VENDORS, 0..40)
    ) {
        let rows = number_rows(items(&indices));
        let output = link_rows(&rows, &ItemFormatter::new(), &options(Strictness::Strict));

        prop_assert!(output.is_clean());
        prop_assert_eq!(output.fragments.len(), rows.len());
        for (i, (fragment, v)) in output.fragments.iter().zip(&indices).enumerate() {
            let expected = format!("item-{} from V{}", i, v);
            prop_assert_eq!(fragment.as_str(), expected.as_str());
        }
    }

    /// Unknown vendors are reported with their row number and never rendered
    #[test]
    fn test_unknown_vendors_are_reported(
        indices in prop::collection::vec(0..2 * KNOWN_VENDORS, 0..40)
    ) {
        let rows = number_rows(items(&indices));
        let formatter = ItemFormatter::new();
        let unknown: Vec<usize> = indices
            .iter()
            .enumerate()
            .filter(|(_, v)| **v >= KNOWN_VENDORS)
            .map(|(i, _)| i + 2)
            .collect();

        let strict = link_rows(&rows, &formatter, &options(Strictness::Strict));
        prop_assert_eq!(strict.fragments.len(), rows.len() - unknown.len());
        let failed_rows: Vec<usize> = strict.errors.iter().map(LinkError::row).collect();
        prop_assert_eq!(failed_rows, unknown.clone());
        for error in &strict.errors {
            match error {
                LinkError::Resolution { key, table, .. } => {
                    prop_assert_eq!(table.as_str(), "vendors");
                    prop_assert!(key.as_str() >= "V5");
                }
                other => prop_assert!(false, "unexpected error {:?}", other),
            }
        }

        let placeholder = link_rows(&rows, &formatter, &options(Strictness::Placeholder));
        prop_assert_eq!(placeholder.fragments.len(), rows.len());
        prop_assert_eq!(placeholder.errors.len(), unknown.len());
        for row in &unknown {
            let expected = format!("item-{}: unavailable", row - 2);
            prop_assert_eq!(placeholder.fragments[row - 2].as_str(), expected.as_str());
        }
    }
}

/// A key shared by two vendors is ambiguous rather than resolved to either
#[test]
fn test_duplicate_vendor_is_ambiguous() {
    let mut formatter = ItemFormatter::new();
    formatter.vendors.insert("V1", "V1 again".to_string());
    let rows = number_rows(items(&[1, 2]));

    let output = link_rows(&rows, &formatter, &LinkOptions::default());

    assert_eq!(output.fragments.len(), 1);
    assert_eq!(output.fragments[0].as_str(), "item-1 from V2");
    match &output.errors[0] {
        LinkError::Resolution { row, reason, .. } => {
            assert_eq!(*row, 2);
            assert_eq!(reason, "2 entries share this key");
        }
        other => panic!("unexpected error {:?}", other),
    }
}
