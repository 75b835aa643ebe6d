use anyhow::{Context, Result};
use log::info;
use std::path::{Path, PathBuf};

use kbmd::table::Table;
use kbmd::validation::{
    validate_reagents, validate_table, validate_zenodo, BasicConfig, ReagentInputs,
    ValidationReport,
};
use kbmd::zenodo::ZenodoMetadata;
use kbmd::Options;

fn load_config(path: &Path) -> Result<BasicConfig> {
    BasicConfig::from_path(path)
        .with_context(|| format!("Failed to load validation config {}", path.display()))
}

fn load_table(path: &Path) -> Result<Table> {
    Table::from_path(path).with_context(|| format!("Failed to load {}", path.display()))
}

fn load_zenodo(path: &Path) -> Result<ZenodoMetadata> {
    ZenodoMetadata::from_path(path).with_context(|| format!("Failed to load {}", path.display()))
}

/// Print the report and exit with an error code if any check failed
fn finish(report: ValidationReport) -> Result<()> {
    // Use colorized output if available
    #[cfg(feature = "colorized_output")]
    {
        println!("{}", report.format_colored());
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        println!("{}", report);
    }

    if report.has_failures() {
        std::process::exit(1);
    }

    Ok(())
}

/// Validate any table against a JSON config
pub fn table(table: PathBuf, config: PathBuf) -> Result<()> {
    info!("Validating {} with {}", table.display(), config.display());
    let config = load_config(&config)?;
    let data = load_table(&table)?;

    let mut report =
        ValidationReport::new("Table Validation Report", table.display().to_string());
    validate_table(&data, &config, &mut report)?;
    finish(report)
}

/// Validate the Zenodo creators list
pub fn zenodo(zenodo: PathBuf) -> Result<()> {
    info!("Validating {}", zenodo.display());
    let metadata = load_zenodo(&zenodo)?;

    let mut report =
        ValidationReport::new("Zenodo Validation Report", zenodo.display().to_string());
    validate_zenodo(&metadata, &mut report);
    finish(report)
}

/// Validate the reagent table against its supporting material
pub fn reagents(
    reagents: PathBuf,
    config: PathBuf,
    zenodo: PathBuf,
    vendors: PathBuf,
    supporting_dir: PathBuf,
    options: &Options,
) -> Result<()> {
    info!("Validating {}", reagents.display());
    info!("Supporting material: {}", supporting_dir.display());

    let config = load_config(&config)?;
    let table = load_table(&reagents)?;
    let zenodo = load_zenodo(&zenodo)?;
    let vendors = load_table(&vendors)?;
    let inputs = ReagentInputs {
        reagents: &table,
        config: &config,
        zenodo: &zenodo,
        vendors: &vendors,
        supporting_root: &supporting_dir,
    };

    let mut report = ValidationReport::new(
        "Reagent Resources Validation Report",
        reagents.display().to_string(),
    );
    validate_reagents(&inputs, &options.validation, &mut report)?;
    finish(report)
}
