//! Contributors page built from the `.zenodo.json` creators list.

use crate::error::Result;
use crate::generators::{fill, render_list, Page};
use crate::linker::{link_rows, RowContext, RowFormatter};
use crate::markdown::{link, Template};
use crate::options::{LinkBases, Options};
use crate::orcid;
use crate::table::Row;
use crate::zenodo::{Creator, ZenodoMetadata};

/// Template placeholder receiving the list
pub const PLACEHOLDER: &str = "contributor_list";

struct CreatorFormatter<'a> {
    links: &'a LinkBases,
}

impl RowFormatter<Creator> for CreatorFormatter<'_> {
    fn row_id(&self, creator: &Creator) -> String {
        creator.name.trim().to_string()
    }

    fn placeholder(&self, creator: &Creator, text: &str) -> String {
        format!("* {}: {}", self.row_id(creator), text)
    }

    fn format(&self, creator: &Creator, cx: &mut RowContext) -> String {
        let name = cx.required(Some(creator.name.as_str()), "name");
        let orcid = cx.required(creator.orcid(), "orcid");
        if !orcid.is_empty() && !orcid::is_well_formed(orcid) {
            cx.invalid("orcid", format!("is not an ORCID: '{}'", orcid));
        }

        let mut item = format!("* {}", link(name, &self.links.orcid(orcid)));
        if let Some(affiliation) = creator.affiliation.as_deref().map(str::trim) {
            if !affiliation.is_empty() {
                item.push_str(", ");
                item.push_str(affiliation);
            }
        }
        item
    }
}

/// Render the contributor list into `template`, sorted by name.
///
/// Problems are reported against the creator's position in the export
/// (starting at 1).
pub fn render(template: &Template, metadata: &ZenodoMetadata, options: &Options) -> Result<Page> {
    let mut rows: Vec<Row<Creator>> = metadata
        .creators
        .iter()
        .enumerate()
        .map(|(i, creator)| Row::new(i + 1, creator.clone()))
        .collect();
    rows.sort_by_cached_key(|row| row.record.name.trim().to_lowercase());

    let formatter = CreatorFormatter {
        links: &options.links,
    };
    let output = link_rows(&rows, &formatter, &options.linking);
    let (rendered, report) = render_list(output, "\n");
    log::info!("Rendered {} contributor(s)", rows.len());

    Ok(Page {
        contents: fill(template, PLACEHOLDER, &rendered)?,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = r#"{"creators": [
        {"name": "Yaniv, Ziv", "orcid": "0000-0003-0315-7727", "affiliation": "NIAID"},
        {"name": "radtke, Andrea J.", "orcid": "0000-0002-1825-0097"},
        {"name": "Doe, Jane"}
    ]}"#;

    #[test]
    fn test_sorted_linked_contributors() {
        let metadata = ZenodoMetadata::from_str("zenodo.json", EXPORT).unwrap();
        let template = Template::parse("the_who.md.in", "{contributor_list}").unwrap();
        let page = render(&template, &metadata, &Options::default()).unwrap();

        assert_eq!(
            page.contents,
            "* [radtke, Andrea J.](https://orcid.org/0000-0002-1825-0097)\n\
             * [Yaniv, Ziv](https://orcid.org/0000-0003-0315-7727), NIAID"
        );
        assert_eq!(page.report.len(), 1);
        assert_eq!(
            page.report.errors()[0].to_string(),
            "row 3 (Doe, Jane): column 'orcid' is missing"
        );
    }
}
