//! Protocols page: a two column table, protocol name linked to its DOI.

use crate::error::Result;
use crate::generators::{fill, render_table, Page};
use crate::linker::{link_rows, RowContext, RowFormatter};
use crate::markdown::{link, MarkdownTable, Template};
use crate::options::{LinkBases, Options};
use crate::records::Protocol;
use crate::table::{is_na, Row};

/// Template placeholder receiving the table
pub const PLACEHOLDER: &str = "protocol_table";

struct ProtocolFormatter<'a> {
    links: &'a LinkBases,
    table: &'a MarkdownTable,
}

impl RowFormatter<Protocol> for ProtocolFormatter<'_> {
    fn row_id(&self, protocol: &Protocol) -> String {
        protocol.name.clone().unwrap_or_default()
    }

    fn placeholder(&self, protocol: &Protocol, text: &str) -> String {
        self.table.filled_row(&self.row_id(protocol), text)
    }

    fn format(&self, protocol: &Protocol, cx: &mut RowContext) -> String {
        let name = cx.required(protocol.name.as_deref(), "Name");
        let description = cx.required(protocol.description.as_deref(), "Description");
        let doi = cx.required(protocol.doi.as_deref(), "DOI");

        let name = if doi.is_empty() || is_na(doi) {
            name.to_string()
        } else {
            link(name, &self.links.doi(doi))
        };
        self.table.row(&[name.as_str(), description])
    }
}

/// Render the protocol table into `template`.
pub fn render(template: &Template, protocols: &[Row<Protocol>], options: &Options) -> Result<Page> {
    let table = MarkdownTable::new(["Protocol", "Description"]);
    let formatter = ProtocolFormatter {
        links: &options.links,
        table: &table,
    };
    let output = link_rows(protocols, &formatter, &options.linking);
    let (rendered, report) = render_table(&table, output);
    log::info!("Rendered {} protocol(s)", protocols.len());

    Ok(Page {
        contents: fill(template, PLACEHOLDER, &rendered)?,
        report,
    })
}
