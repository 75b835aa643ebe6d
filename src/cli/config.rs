//! TOML configuration file support.
//!
//! Every key is optional; anything left out keeps its built-in default:
//!
//! ```toml
//! # kbmd.toml
//! [links]
//! orcid_base = "https://sandbox.orcid.org/"
//! supporting_material_prefix = "supporting_material"
//!
//! [linking]
//! strictness = "placeholder"
//! placeholder = "unavailable"
//!
//! [validation]
//! max_orcid_entries = 5
//! ignored_files = [".DS_Store", "Thumbs.db"]
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use kbmd::linker::Strictness;
use kbmd::Options;

/// Root configuration structure for kbmd.toml files.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Link derivation settings.
    #[serde(default)]
    pub links: LinksConfig,

    /// Failed row handling.
    #[serde(default)]
    pub linking: LinkingConfig,

    /// Validation limits.
    #[serde(default)]
    pub validation: ValidationConfig,
}

/// Base URLs and prefixes used to build links.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinksConfig {
    /// Prefix for DOI links.
    pub doi_base: Option<String>,

    /// Prefix for ORCID profile links.
    pub orcid_base: Option<String>,

    /// Prefix for UniProt entry links.
    pub uniprot_base: Option<String>,

    /// Prefix for YouTube watch links.
    pub youtube_watch_base: Option<String>,

    /// Prefix for YouTube thumbnails.
    pub youtube_thumbnail_base: Option<String>,

    /// Site path of the supporting material directory.
    pub supporting_material_prefix: Option<String>,
}

/// What to do with rows that fail to link.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinkingConfig {
    /// `strict` drops failed rows, `placeholder` keeps a placeholder.
    pub strictness: Option<Strictness>,

    /// Text shown for a failed row in placeholder mode.
    pub placeholder: Option<String>,
}

/// Validation limits.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValidationConfig {
    /// Maximal number of ORCIDs in an Agree or Disagree cell.
    pub max_orcid_entries: Option<usize>,

    /// File names ignored when looking for unlisted supporting files.
    pub ignored_files: Option<Vec<String>>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Overlay the configured values on the built-in defaults.
    pub fn into_options(self) -> Options {
        let mut options = Options::default();

        let links = &mut options.links;
        let overrides = [
            (&mut links.doi_base, self.links.doi_base),
            (&mut links.orcid_base, self.links.orcid_base),
            (&mut links.uniprot_base, self.links.uniprot_base),
            (&mut links.youtube_watch_base, self.links.youtube_watch_base),
            (&mut links.youtube_thumbnail_base, self.links.youtube_thumbnail_base),
            (
                &mut links.supporting_material_prefix,
                self.links.supporting_material_prefix,
            ),
        ];
        for (field, value) in overrides {
            if let Some(value) = value {
                *field = value;
            }
        }

        if let Some(strictness) = self.linking.strictness {
            options.linking.strictness = strictness;
        }
        if let Some(placeholder) = self.linking.placeholder {
            options.linking.placeholder = placeholder;
        }

        if let Some(max) = self.validation.max_orcid_entries {
            options.validation.max_orcid_entries = max;
        }
        if let Some(ignored) = self.validation.ignored_files {
            options.validation.ignored_files = ignored;
        }

        options
    }
}

/// Options from an optional config file, with the CLI strictness flag applied last.
pub fn load_options(path: Option<&Path>, strictness: Option<Strictness>) -> Result<Options> {
    let config = match path {
        Some(path) => {
            log::info!("Loading config from {}", path.display());
            Config::from_file(path)?
        }
        None => Config::default(),
    };
    let mut options = config.into_options();
    if let Some(strictness) = strictness {
        options.linking.strictness = strictness;
    }
    log::debug!("Options: {:?}", options);
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [links]
            orcid_base = "https://sandbox.orcid.org/"
            supporting_material_prefix = "material"

            [linking]
            strictness = "placeholder"
            placeholder = "n/a"

            [validation]
            max_orcid_entries = 3
            ignored_files = [".DS_Store", "Thumbs.db"]
        "#;

        let options = Config::from_str(toml).unwrap().into_options();
        assert_eq!(options.links.orcid_base, "https://sandbox.orcid.org/");
        assert_eq!(options.links.supporting_material_prefix, "material");
        assert_eq!(options.links.doi_base, "https://doi.org/");
        assert_eq!(options.linking.strictness, Strictness::Placeholder);
        assert_eq!(options.linking.placeholder, "n/a");
        assert_eq!(options.validation.max_orcid_entries, 3);
        assert_eq!(options.validation.ignored_files, vec![".DS_Store", "Thumbs.db"]);
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
            [validation]
            max_orcid_entries = 10
        "#;

        let options = Config::from_str(toml).unwrap().into_options();
        assert_eq!(options.validation.max_orcid_entries, 10);
        assert_eq!(options.linking.strictness, Strictness::Strict);
    }

    #[test]
    fn test_empty_config() {
        let options = Config::from_str("").unwrap().into_options();
        assert_eq!(options, Options::default());
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!(Config::from_str("[links]\norcid = \"x\"\n").is_err());
        assert!(Config::from_str("[linking]\nstrictness = \"lenient\"\n").is_err());
    }

    #[test]
    fn test_cli_strictness_wins() {
        let options = load_options(None, Some(Strictness::Placeholder)).unwrap();
        assert_eq!(options.linking.strictness, Strictness::Placeholder);
    }
}
