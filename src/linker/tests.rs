use super::*;

#[derive(Debug, Clone)]
struct Item {
    id: &'static str,
    vendor_id: Option<&'static str>,
}

#[derive(Debug)]
struct VendorEntry {
    id: &'static str,
    name: &'static str,
    url: &'static str,
}

struct ItemFormatter {
    vendors: LookupTable<VendorEntry>,
}

impl ItemFormatter {
    fn new() -> Self {
        let vendors = LookupTable::build(
            "vendors",
            [VendorEntry {
                id: "V1",
                name: "Acme",
                url: "http://acme.example",
            }],
            |v| Some(v.id.to_string()),
        );
        Self { vendors }
    }
}

impl RowFormatter<Item> for ItemFormatter {
    fn row_id(&self, row: &Item) -> String {
        row.id.to_string()
    }

    fn format(&self, row: &Item, cx: &mut RowContext) -> String {
        let vendor_id = cx.required(row.vendor_id, "vendor_id");
        if vendor_id.is_empty() {
            return String::new();
        }
        match cx.resolve(&self.vendors, "vendor_id", vendor_id) {
            Some(vendor) => format!("| {} | [{}]({}) |", row.id, vendor.name, vendor.url),
            None => String::new(),
        }
    }
}

fn rows(items: &[Item]) -> Vec<Row<Item>> {
    crate::table::number_rows(items.iter().cloned())
}

#[test]
fn test_resolved_vendor_is_substituted() {
    let rows = rows(&[Item {
        id: "AB123",
        vendor_id: Some("V1"),
    }]);
    let output = link_rows(&rows, &ItemFormatter::new(), &LinkOptions::default());

    assert!(output.is_clean());
    assert_eq!(output.fragments.len(), 1);
    assert!(output.fragments[0].as_str().contains("Acme"));
    assert!(output.fragments[0].as_str().contains("http://acme.example"));
}

#[test]
fn test_unresolved_vendor_is_reported_not_rendered() {
    let rows = rows(&[Item {
        id: "AB123",
        vendor_id: Some("V9"),
    }]);
    let output = link_rows(&rows, &ItemFormatter::new(), &LinkOptions::default());

    assert!(output.fragments.is_empty());
    assert_eq!(output.errors.len(), 1);
    let error = &output.errors[0];
    assert!(error.is_resolution());
    assert_eq!(error.id(), "AB123");
    assert_eq!(error.row(), 2);
    let message = error.to_string();
    assert!(message.contains("AB123"));
    assert!(message.contains("V9"));
}

#[test]
fn test_resolution_messages_name_the_reason() {
    let mut formatter = ItemFormatter::new();
    formatter.vendors.insert(
        "V1",
        VendorEntry {
            id: "V1",
            name: "Acme Europe",
            url: "http://acme.example/eu",
        },
    );
    let rows = rows(&[
        Item {
            id: "AB123",
            vendor_id: Some("V1"),
        },
        Item {
            id: "CD456",
            vendor_id: Some("V9"),
        },
    ]);
    let output = link_rows(&rows, &formatter, &LinkOptions::default());

    let messages: Vec<String> = output.errors.iter().map(|e| e.to_string()).collect();
    assert_eq!(
        messages,
        vec![
            "row 2 (AB123): 'V1' in column 'vendor_id' does not resolve in vendors: \
             2 entries share this key",
            "row 3 (CD456): 'V9' in column 'vendor_id' does not resolve in vendors: \
             no matching entry",
        ]
    );
}

#[test]
fn test_placeholder_mode_keeps_row_positions() {
    let rows = rows(&[
        Item {
            id: "A",
            vendor_id: Some("V1"),
        },
        Item {
            id: "B",
            vendor_id: Some("V9"),
        },
        Item {
            id: "C",
            vendor_id: Some("V1"),
        },
    ]);
    let options = LinkOptions {
        strictness: Strictness::Placeholder,
        placeholder: "unavailable".to_string(),
    };
    let output = link_rows(&rows, &ItemFormatter::new(), &options);

    assert_eq!(output.fragments.len(), 3);
    assert_eq!(output.fragments[1].as_str(), "B: unavailable");
    assert!(output.fragments[2].as_str().starts_with("| C |"));
    assert_eq!(output.errors.len(), 1);
}

#[test]
fn test_all_failures_are_collected() {
    let rows = rows(&[
        Item {
            id: "A",
            vendor_id: None,
        },
        Item {
            id: "B",
            vendor_id: Some(" "),
        },
        Item {
            id: "C",
            vendor_id: Some("V1"),
        },
        Item {
            id: "D",
            vendor_id: Some("V7"),
        },
    ]);
    let output = link_rows(&rows, &ItemFormatter::new(), &LinkOptions::default());

    assert_eq!(output.fragments.len(), 1);
    let ids: Vec<&str> = output.errors.iter().map(LinkError::id).collect();
    assert_eq!(ids, vec!["A", "B", "D"]);
    assert!(matches!(
        output.errors[0],
        LinkError::Format { ref reason, .. } if reason == "is missing"
    ));
    assert!(matches!(
        output.errors[1],
        LinkError::Format { ref reason, .. } if reason == "is empty"
    ));

    let report = output.into_result().unwrap_err();
    let text = report.to_string();
    assert!(text.starts_with("3 problem(s) found:"));
    assert_eq!(text.lines().count(), 4);
}

#[test]
fn test_output_is_deterministic() {
    let items = [
        Item {
            id: "A",
            vendor_id: Some("V1"),
        },
        Item {
            id: "B",
            vendor_id: Some("V1"),
        },
    ];
    let formatter = ItemFormatter::new();
    let first = link_rows(&rows(&items), &formatter, &LinkOptions::default());
    let second = link_rows(&rows(&items), &formatter, &LinkOptions::default());

    assert_eq!(
        join_fragments(&first.fragments, "\n"),
        join_fragments(&second.fragments, "\n")
    );
}
