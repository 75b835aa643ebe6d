use anyhow::{anyhow, Context, Result};
use log::info;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

use kbmd::bibtex;
use kbmd::files::{read_text, write_atomic};
use kbmd::generators::{self, reagents::vendor_lookup, Page};
use kbmd::markdown::{output_name, Template};
use kbmd::records::{
    Dataset, DictionaryEntry, GlossaryTerm, Protocol, Reagent, Software, Vendor, Video,
};
use kbmd::supporting::markdown_files;
use kbmd::table::{read_records, Row, Table};
use kbmd::zenodo::ZenodoMetadata;
use kbmd::Options;

/// Template and destination of a generated page
pub struct PageTarget {
    /// `.md.in` template
    pub template: PathBuf,
    /// Directory receiving the page
    pub output_dir: PathBuf,
}

fn load_template(path: &Path) -> Result<Template> {
    Template::from_path(path).with_context(|| format!("Failed to load template {}", path.display()))
}

fn load_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<Row<T>>> {
    read_records(path).with_context(|| format!("Failed to load {}", path.display()))
}

fn load_table(path: &Path) -> Result<Table> {
    Table::from_path(path).with_context(|| format!("Failed to load {}", path.display()))
}

/// Write `page` next to its siblings, then fail the run if any row did not link.
///
/// In strict mode a page with problems is not written at all; in placeholder
/// mode it is written with placeholders for the failed rows.
fn finish(target: &PageTarget, page: Page, options: &Options) -> Result<()> {
    let name = output_name(&target.template).ok_or_else(|| {
        anyhow!(
            "Template file name must end in '.in': {}",
            target.template.display()
        )
    })?;
    let output = target.output_dir.join(name);
    let strictness = options.linking.strictness;

    let written = page
        .write(&output, strictness)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    if written {
        info!("Wrote {}", output.display());
    }

    if !page.is_clean() {
        eprintln!("{}", page.report);
        if !written {
            eprintln!("{} was not written", output.display());
        }
        std::process::exit(1);
    }
    Ok(())
}

/// Reagent resources page
pub fn reagents(
    target: PageTarget,
    reagents: PathBuf,
    vendors: PathBuf,
    supporting_dir: PathBuf,
    options: &Options,
) -> Result<()> {
    let template = load_template(&target.template)?;
    let rows: Vec<Row<Reagent>> = load_records(&reagents)?;
    let vendors = vendor_lookup(&load_records::<Vendor>(&vendors)?);
    let supporting = markdown_files(&supporting_dir).with_context(|| {
        format!(
            "Failed to list supporting material in {}",
            supporting_dir.display()
        )
    })?;
    info!(
        "Rendering {} reagent(s) against {} vendor(s) and {} supporting file(s)",
        rows.len(),
        vendors.len(),
        supporting.len()
    );

    let page = generators::reagents::render(&template, &rows, &vendors, &supporting, options)?;
    finish(&target, page, options)
}

/// Fluorescent probes page
pub fn probes(target: PageTarget, probes: PathBuf, options: &Options) -> Result<()> {
    let template = load_template(&target.template)?;
    let table = load_table(&probes)?;
    let page = generators::probes::render(&template, &table, options)?;
    finish(&target, page, options)
}

/// Protocols page
pub fn protocols(target: PageTarget, protocols: PathBuf, options: &Options) -> Result<()> {
    let template = load_template(&target.template)?;
    let rows: Vec<Row<Protocol>> = load_records(&protocols)?;
    let page = generators::protocols::render(&template, &rows, options)?;
    finish(&target, page, options)
}

/// Instructional videos page
pub fn videos(target: PageTarget, videos: PathBuf, options: &Options) -> Result<()> {
    let template = load_template(&target.template)?;
    let rows: Vec<Row<Video>> = load_records(&videos)?;
    let page = generators::videos::render(&template, &rows, options)?;
    finish(&target, page, options)
}

/// Data and software page
pub fn data_software(
    target: PageTarget,
    datasets: PathBuf,
    software: PathBuf,
    options: &Options,
) -> Result<()> {
    let template = load_template(&target.template)?;
    let datasets: Vec<Row<Dataset>> = load_records(&datasets)?;
    let software: Vec<Row<Software>> = load_records(&software)?;
    let page = generators::data_software::render(&template, &datasets, &software, options)?;
    finish(&target, page, options)
}

/// Publications page from a BibTeX file
pub fn publications(target: PageTarget, bibfile: PathBuf, options: &Options) -> Result<()> {
    let template = load_template(&target.template)?;
    let text = read_text(&bibfile)?;
    let entries =
        bibtex::parse(&text).with_context(|| format!("Failed to parse {}", bibfile.display()))?;
    info!("Parsed {} BibTeX entries", entries.len());
    let page = generators::publications::render(&template, &entries, options)?;
    finish(&target, page, options)
}

/// Contributors page from the Zenodo metadata
pub fn contributors(target: PageTarget, zenodo: PathBuf, options: &Options) -> Result<()> {
    let template = load_template(&target.template)?;
    let metadata = ZenodoMetadata::from_path(&zenodo)
        .with_context(|| format!("Failed to load {}", zenodo.display()))?;
    let page = generators::contributors::render(&template, &metadata, options)?;
    finish(&target, page, options)
}

/// Data dictionary and glossary page
pub fn glossary(
    target: PageTarget,
    dictionary: PathBuf,
    glossary: PathBuf,
    options: &Options,
) -> Result<()> {
    let template = load_template(&target.template)?;
    let dictionary: Vec<Row<DictionaryEntry>> = load_records(&dictionary)?;
    let glossary: Vec<Row<GlossaryTerm>> = load_records(&glossary)?;
    let page = generators::glossary::render(&template, &dictionary, &glossary, options)?;
    finish(&target, page, options)
}

/// Landing page statistics
pub fn index_stats(target: PageTarget, reagents: PathBuf, options: &Options) -> Result<()> {
    let template = load_template(&target.template)?;
    let rows: Vec<Row<Reagent>> = load_records(&reagents)?;
    let page = generators::index_stats::render(&template, &rows)?;
    finish(&target, page, options)
}

/// Supporting material skeletons for a batch of new configurations
pub fn supporting(
    batch: PathBuf,
    output_dir: PathBuf,
    template: PathBuf,
    options: &Options,
) -> Result<()> {
    let template = load_template(&template)?;
    let table = load_table(&batch)?;
    let pages = generators::supporting::render(&template, &table, options)?;

    for file in &pages.files {
        let path = output_dir.join(&file.relative_path);
        if path.exists() {
            log::warn!("Overwriting {}", path.display());
        }
        write_atomic(&path, &file.contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    info!(
        "Wrote {} supporting file(s) below {}",
        pages.files.len(),
        output_dir.display()
    );

    if !pages.report.is_empty() {
        eprintln!("{}", pages.report);
        std::process::exit(1);
    }
    Ok(())
}
