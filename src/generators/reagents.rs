//! Reagent resources page.
//!
//! One table row per reagent configuration, in input order. The vendor name is
//! resolved against the vendor table and linked to its website, the UniProt
//! accession is linked to its entry, and every Agree/Disagree ORCID links to
//! the contributor's supporting material file, which must exist.

use std::path::PathBuf;

use crate::error::Result;
use crate::generators::{fill, render_table, Page};
use crate::linker::{link_rows, RowContext, RowFormatter};
use crate::lookup::LookupTable;
use crate::markdown::{link, MarkdownTable, Template};
use crate::options::{LinkBases, Options};
use crate::records::{columns, Reagent, Vendor};
use crate::supporting::contributor_file;
use crate::table::{is_na, split_multi, Row, NA};

/// Template placeholder receiving the table
pub const PLACEHOLDER: &str = "reagent_table";

/// Columns shown on the page, in order
pub const PAGE_COLUMNS: [&str; 13] = [
    columns::TARGET,
    columns::TARGET_SPECIES,
    columns::CLONE,
    columns::HOST_ORGANISM,
    columns::ISOTYPE,
    columns::CONJUGATE,
    columns::VENDOR,
    columns::CATALOG_NUMBER,
    columns::LOT_NUMBER,
    columns::UNIPROT,
    columns::RECOMMENDED,
    columns::AGREE,
    columns::DISAGREE,
];

/// Index vendors by name
pub fn vendor_lookup(vendors: &[Row<Vendor>]) -> LookupTable<Vendor> {
    LookupTable::build(
        "vendors",
        vendors.iter().map(|row| row.record.clone()),
        |vendor| {
            vendor
                .name
                .as_deref()
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
        },
    )
}

struct ReagentFormatter<'a> {
    vendors: &'a LookupTable<Vendor>,
    supporting: &'a LookupTable<PathBuf>,
    links: &'a LinkBases,
    table: &'a MarkdownTable,
}

impl ReagentFormatter<'_> {
    fn vendor(&self, cx: &mut RowContext, name: &str) -> String {
        if name.is_empty() || is_na(name) {
            return name.to_string();
        }
        match cx.resolve(self.vendors, columns::VENDOR, name) {
            Some(vendor) => match vendor.url.as_deref().map(str::trim) {
                Some(url) if !url.is_empty() && !is_na(url) => link(name, url),
                _ => name.to_string(),
            },
            None => String::new(),
        }
    }

    fn uniprot(&self, accession: &str) -> String {
        if accession.is_empty() || is_na(accession) {
            accession.to_string()
        } else {
            link(accession, &self.links.uniprot(accession))
        }
    }

    fn orcids(
        &self,
        cx: &mut RowContext,
        column: &str,
        cell: &str,
        target: &str,
        conjugate: &str,
    ) -> String {
        let orcids = split_multi(cell);
        if orcids.is_empty() {
            return NA.to_string();
        }
        let mut rendered = Vec::with_capacity(orcids.len());
        for orcid in &orcids {
            let file = contributor_file(target, conjugate, orcid);
            if cx.resolve(self.supporting, column, &file).is_some() {
                rendered.push(link(orcid, &self.links.supporting_material(&file)));
            }
        }
        rendered.join(", ")
    }
}

impl RowFormatter<Reagent> for ReagentFormatter<'_> {
    fn row_id(&self, reagent: &Reagent) -> String {
        reagent.id()
    }

    fn placeholder(&self, reagent: &Reagent, text: &str) -> String {
        self.table.filled_row(&format!("{}: {}", reagent.id(), text), "")
    }

    fn format(&self, reagent: &Reagent, cx: &mut RowContext) -> String {
        let target = cx.required(reagent.target.as_deref(), columns::TARGET);
        let species = cx.required(reagent.target_species.as_deref(), columns::TARGET_SPECIES);
        let clone = cx.required(reagent.clone.as_deref(), columns::CLONE);
        let host = cx.required(reagent.host_organism.as_deref(), columns::HOST_ORGANISM);
        let isotype = cx.required(reagent.isotype.as_deref(), columns::ISOTYPE);
        let conjugate = cx.required(reagent.conjugate.as_deref(), columns::CONJUGATE);
        let vendor = cx.required(reagent.vendor.as_deref(), columns::VENDOR);
        let catalog = cx.required(reagent.catalog_number.as_deref(), columns::CATALOG_NUMBER);
        let lot = cx.required(reagent.lot_number.as_deref(), columns::LOT_NUMBER);
        let uniprot = cx.required(reagent.uniprot.as_deref(), columns::UNIPROT);
        let recommended = cx.required(reagent.recommended.as_deref(), columns::RECOMMENDED);
        let agree = cx.required(reagent.agree.as_deref(), columns::AGREE);
        let disagree = cx.required(reagent.disagree.as_deref(), columns::DISAGREE);

        let vendor = self.vendor(cx, vendor);
        let uniprot = self.uniprot(uniprot);
        let agree = self.orcids(cx, columns::AGREE, agree, target, conjugate);
        let disagree = self.orcids(cx, columns::DISAGREE, disagree, target, conjugate);

        self.table.row(&[
            target,
            species,
            clone,
            host,
            isotype,
            conjugate,
            vendor.as_str(),
            catalog,
            lot,
            uniprot.as_str(),
            recommended,
            agree.as_str(),
            disagree.as_str(),
        ])
    }
}

/// Render the reagent table into `template`.
///
/// `supporting` indexes the supporting material markdown files by relative
/// path (see [`crate::supporting::markdown_files`]).
pub fn render(
    template: &Template,
    reagents: &[Row<Reagent>],
    vendors: &LookupTable<Vendor>,
    supporting: &LookupTable<PathBuf>,
    options: &Options,
) -> Result<Page> {
    let table = MarkdownTable::new(PAGE_COLUMNS);
    let formatter = ReagentFormatter {
        vendors,
        supporting,
        links: &options.links,
        table: &table,
    };
    let output = link_rows(reagents, &formatter, &options.linking);
    let (rendered, report) = render_table(&table, output);
    log::info!("Rendered reagent table from {} row(s)", reagents.len());

    Ok(Page {
        contents: fill(template, PLACEHOLDER, &rendered)?,
        report,
    })
}
