//! # kbmd
//!
//! Command-line tool that renders the knowledge-base website pages from their
//! CSV, BibTeX and Zenodo sources and validates those sources.
//!
//! ## Usage
//!
//! ```bash
//! # Render a page: template, inputs, output directory
//! kbmd probes probes.md.in fluorescent_probes.csv docs/
//! kbmd reagents reagents.md.in reagent_resources.csv vendors_and_urls.csv \
//!     supporting_material/ docs/
//!
//! # Create supporting material files for new reagent configurations
//! kbmd supporting new_reagents.csv supporting_material/ supporting_template.md
//!
//! # Validate the inputs
//! kbmd validate-zenodo .zenodo.json
//! kbmd validate-reagents reagent_resources.csv reagent_config.json .zenodo.json \
//!     vendors_and_urls.csv supporting_material/
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
