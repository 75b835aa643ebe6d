use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use kbmd::linker::Strictness;

mod config;
mod generate;
mod validate;

use generate::PageTarget;

/// kbmd - Knowledge-Base Markdown Generator and Validator
#[derive(Parser)]
#[command(name = "kbmd")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Handling of rows that fail to link (overrides the config file)
    #[arg(long, value_enum, global = true)]
    strictness: Option<StrictnessArg>,

    #[command(subcommand)]
    command: Commands,
}

/// Handling of rows that fail to link.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum StrictnessArg {
    /// Leave failed rows out and do not write the page
    Strict,
    /// Write the page with a placeholder for every failed row
    Placeholder,
}

impl From<StrictnessArg> for Strictness {
    fn from(arg: StrictnessArg) -> Self {
        match arg {
            StrictnessArg::Strict => Strictness::Strict,
            StrictnessArg::Placeholder => Strictness::Placeholder,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the reagent resources page
    Reagents {
        /// Page template (.md.in)
        #[arg(value_name = "TEMPLATE")]
        template: PathBuf,

        /// Reagent resources table
        #[arg(value_name = "REAGENTS_CSV")]
        reagents: PathBuf,

        /// Vendor table
        #[arg(value_name = "VENDORS_CSV")]
        vendors: PathBuf,

        /// Supporting material root directory
        #[arg(value_name = "SUPPORTING_DIR")]
        supporting_dir: PathBuf,

        /// Directory receiving the page
        #[arg(value_name = "OUTPUT_DIR")]
        output_dir: PathBuf,
    },

    /// Generate the fluorescent probes page
    Probes {
        /// Page template (.md.in)
        #[arg(value_name = "TEMPLATE")]
        template: PathBuf,

        /// Fluorescent probes table
        #[arg(value_name = "PROBES_CSV")]
        probes: PathBuf,

        /// Directory receiving the page
        #[arg(value_name = "OUTPUT_DIR")]
        output_dir: PathBuf,
    },

    /// Generate the protocols page
    Protocols {
        /// Page template (.md.in)
        #[arg(value_name = "TEMPLATE")]
        template: PathBuf,

        /// Protocols table
        #[arg(value_name = "PROTOCOLS_CSV")]
        protocols: PathBuf,

        /// Directory receiving the page
        #[arg(value_name = "OUTPUT_DIR")]
        output_dir: PathBuf,
    },

    /// Generate the instructional videos page
    Videos {
        /// Page template (.md.in)
        #[arg(value_name = "TEMPLATE")]
        template: PathBuf,

        /// Videos table
        #[arg(value_name = "VIDEOS_CSV")]
        videos: PathBuf,

        /// Directory receiving the page
        #[arg(value_name = "OUTPUT_DIR")]
        output_dir: PathBuf,
    },

    /// Generate the data and software page
    DataSoftware {
        /// Page template (.md.in)
        #[arg(value_name = "TEMPLATE")]
        template: PathBuf,

        /// Datasets table
        #[arg(value_name = "DATASETS_CSV")]
        datasets: PathBuf,

        /// Software table
        #[arg(value_name = "SOFTWARE_CSV")]
        software: PathBuf,

        /// Directory receiving the page
        #[arg(value_name = "OUTPUT_DIR")]
        output_dir: PathBuf,
    },

    /// Generate the publications page
    Publications {
        /// Page template (.md.in)
        #[arg(value_name = "TEMPLATE")]
        template: PathBuf,

        /// BibTeX file
        #[arg(value_name = "BIBFILE")]
        bibfile: PathBuf,

        /// Directory receiving the page
        #[arg(value_name = "OUTPUT_DIR")]
        output_dir: PathBuf,
    },

    /// Generate the contributors page
    Contributors {
        /// Page template (.md.in)
        #[arg(value_name = "TEMPLATE")]
        template: PathBuf,

        /// Zenodo metadata (.zenodo.json)
        #[arg(value_name = "ZENODO_JSON")]
        zenodo: PathBuf,

        /// Directory receiving the page
        #[arg(value_name = "OUTPUT_DIR")]
        output_dir: PathBuf,
    },

    /// Generate the data dictionary and glossary page
    Glossary {
        /// Page template (.md.in)
        #[arg(value_name = "TEMPLATE")]
        template: PathBuf,

        /// Data dictionary table
        #[arg(value_name = "DICTIONARY_CSV")]
        dictionary: PathBuf,

        /// Glossary table
        #[arg(value_name = "GLOSSARY_CSV")]
        glossary: PathBuf,

        /// Directory receiving the page
        #[arg(value_name = "OUTPUT_DIR")]
        output_dir: PathBuf,
    },

    /// Generate the landing page statistics
    IndexStats {
        /// Page template (.md.in)
        #[arg(value_name = "TEMPLATE")]
        template: PathBuf,

        /// Reagent resources table
        #[arg(value_name = "REAGENTS_CSV")]
        reagents: PathBuf,

        /// Directory receiving the page
        #[arg(value_name = "OUTPUT_DIR")]
        output_dir: PathBuf,
    },

    /// Create supporting material files for a batch of new configurations
    Supporting {
        /// Batch of new reagent configurations
        #[arg(value_name = "BATCH_CSV")]
        batch: PathBuf,

        /// Supporting material root receiving the files
        #[arg(value_name = "OUTPUT_DIR")]
        output_dir: PathBuf,

        /// Supporting file template
        #[arg(value_name = "TEMPLATE")]
        template: PathBuf,
    },

    /// Validate a table against a JSON config
    ValidateTable {
        /// Table to validate
        #[arg(value_name = "CSV")]
        table: PathBuf,

        /// Validation config (JSON)
        #[arg(value_name = "CONFIG_JSON")]
        config: PathBuf,
    },

    /// Validate the Zenodo contributor list
    ValidateZenodo {
        /// Zenodo metadata (.zenodo.json)
        #[arg(value_name = "ZENODO_JSON")]
        zenodo: PathBuf,
    },

    /// Validate the reagent table and its supporting material
    ValidateReagents {
        /// Reagent resources table
        #[arg(value_name = "REAGENTS_CSV")]
        reagents: PathBuf,

        /// Validation config (JSON)
        #[arg(value_name = "CONFIG_JSON")]
        config: PathBuf,

        /// Zenodo metadata (.zenodo.json)
        #[arg(value_name = "ZENODO_JSON")]
        zenodo: PathBuf,

        /// Vendor table
        #[arg(value_name = "VENDORS_CSV")]
        vendors: PathBuf,

        /// Supporting material root directory
        #[arg(value_name = "SUPPORTING_DIR")]
        supporting_dir: PathBuf,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    let strictness = cli.strictness.map(Strictness::from);
    let options = config::load_options(cli.config.as_deref(), strictness)?;
    let page = |template, output_dir| PageTarget {
        template,
        output_dir,
    };

    match cli.command {
        Commands::Reagents {
            template,
            reagents,
            vendors,
            supporting_dir,
            output_dir,
        } => generate::reagents(
            page(template, output_dir),
            reagents,
            vendors,
            supporting_dir,
            &options,
        ),
        Commands::Probes {
            template,
            probes,
            output_dir,
        } => generate::probes(page(template, output_dir), probes, &options),
        Commands::Protocols {
            template,
            protocols,
            output_dir,
        } => generate::protocols(page(template, output_dir), protocols, &options),
        Commands::Videos {
            template,
            videos,
            output_dir,
        } => generate::videos(page(template, output_dir), videos, &options),
        Commands::DataSoftware {
            template,
            datasets,
            software,
            output_dir,
        } => generate::data_software(page(template, output_dir), datasets, software, &options),
        Commands::Publications {
            template,
            bibfile,
            output_dir,
        } => generate::publications(page(template, output_dir), bibfile, &options),
        Commands::Contributors {
            template,
            zenodo,
            output_dir,
        } => generate::contributors(page(template, output_dir), zenodo, &options),
        Commands::Glossary {
            template,
            dictionary,
            glossary,
            output_dir,
        } => generate::glossary(page(template, output_dir), dictionary, glossary, &options),
        Commands::IndexStats {
            template,
            reagents,
            output_dir,
        } => generate::index_stats(page(template, output_dir), reagents, &options),
        Commands::Supporting {
            batch,
            output_dir,
            template,
        } => generate::supporting(batch, output_dir, template, &options),
        Commands::ValidateTable { table, config } => validate::table(table, config),
        Commands::ValidateZenodo { zenodo } => validate::zenodo(zenodo),
        Commands::ValidateReagents {
            reagents,
            config,
            zenodo,
            vendors,
            supporting_dir,
        } => validate::reagents(reagents, config, zenodo, vendors, supporting_dir, &options),
    }
}
