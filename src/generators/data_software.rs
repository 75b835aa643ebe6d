//! Data and software page: a dataset table and a software table.

use crate::error::Result;
use crate::generators::{render_table, Page};
use crate::linker::{link_rows, RowContext, RowFormatter};
use crate::markdown::{link, MarkdownTable, Template};
use crate::options::{LinkBases, Options};
use crate::records::{Dataset, Software};
use crate::table::{is_na, Row};

/// Template placeholder receiving the dataset table
pub const DATASET_PLACEHOLDER: &str = "dataset_table";

/// Template placeholder receiving the software table
pub const SOFTWARE_PLACEHOLDER: &str = "software_table";

struct DatasetFormatter<'a> {
    links: &'a LinkBases,
    table: &'a MarkdownTable,
}

impl RowFormatter<Dataset> for DatasetFormatter<'_> {
    fn row_id(&self, dataset: &Dataset) -> String {
        dataset.name.clone().unwrap_or_default()
    }

    fn placeholder(&self, dataset: &Dataset, text: &str) -> String {
        self.table.filled_row(&self.row_id(dataset), text)
    }

    fn format(&self, dataset: &Dataset, cx: &mut RowContext) -> String {
        let name = cx.required(dataset.name.as_deref(), "Name");
        let description = cx.required(dataset.description.as_deref(), "Description");
        let doi = cx.required(dataset.doi.as_deref(), "DOI");

        let name = if doi.is_empty() || is_na(doi) {
            name.to_string()
        } else {
            link(name, &self.links.doi(doi))
        };
        self.table.row(&[name.as_str(), description])
    }
}

struct SoftwareFormatter<'a> {
    table: &'a MarkdownTable,
}

impl RowFormatter<Software> for SoftwareFormatter<'_> {
    fn row_id(&self, software: &Software) -> String {
        software.name.clone().unwrap_or_default()
    }

    fn placeholder(&self, software: &Software, text: &str) -> String {
        self.table.filled_row(&self.row_id(software), text)
    }

    fn format(&self, software: &Software, cx: &mut RowContext) -> String {
        let name = cx.required(software.name.as_deref(), "Name");
        let description = cx.required(software.description.as_deref(), "Description");
        let url = cx.required(software.url.as_deref(), "URL");
        let language = cx.required(software.language.as_deref(), "Language");

        let name = if url.is_empty() || is_na(url) {
            name.to_string()
        } else {
            link(name, url)
        };
        self.table.row(&[name.as_str(), description, language])
    }
}

/// Render both tables into `template`.
pub fn render(
    template: &Template,
    datasets: &[Row<Dataset>],
    software: &[Row<Software>],
    options: &Options,
) -> Result<Page> {
    let dataset_table = MarkdownTable::new(["Dataset", "Description"]);
    let dataset_formatter = DatasetFormatter {
        links: &options.links,
        table: &dataset_table,
    };
    let output = link_rows(datasets, &dataset_formatter, &options.linking);
    let (dataset_md, mut report) = render_table(&dataset_table, output);

    let software_table = MarkdownTable::new(["Software", "Description", "Language"]);
    let software_formatter = SoftwareFormatter {
        table: &software_table,
    };
    let output = link_rows(software, &software_formatter, &options.linking);
    let (software_md, software_report) = render_table(&software_table, output);
    report.merge(software_report);

    log::info!(
        "Rendered {} dataset(s) and {} software package(s)",
        datasets.len(),
        software.len()
    );
    let contents = template.render(&[
        (DATASET_PLACEHOLDER, dataset_md.as_str()),
        (SOFTWARE_PLACEHOLDER, software_md.as_str()),
    ])?;
    Ok(Page { contents, report })
}
