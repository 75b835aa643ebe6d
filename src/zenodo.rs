//! `.zenodo.json` metadata export.
//!
//! Only the `creators` list is modelled; every other key in the export is
//! ignored.

use std::path::Path;

use serde::Deserialize;

use crate::error::{KbError, Result};
use crate::files::read_text;

/// Contents of a `.zenodo.json` file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ZenodoMetadata {
    /// Knowledge-base contributors in file order
    #[serde(default)]
    pub creators: Vec<Creator>,
}

/// One contributor entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Creator {
    /// Display name, usually `Family, Given`
    pub name: String,
    /// ORCID, without the `https://orcid.org/` prefix
    #[serde(default)]
    pub orcid: Option<String>,
    /// Institution
    #[serde(default)]
    pub affiliation: Option<String>,
}

impl Creator {
    /// Trimmed ORCID, `None` when absent or blank
    pub fn orcid(&self) -> Option<&str> {
        self.orcid.as_deref().map(str::trim).filter(|o| !o.is_empty())
    }
}

impl ZenodoMetadata {
    /// Load and parse a `.zenodo.json` file
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = read_text(path)?;
        let name = path.display().to_string();
        Self::from_str(&name, &text)
    }

    /// Parse JSON text. `name` identifies the document in errors.
    pub fn from_str(name: &str, text: &str) -> Result<Self> {
        let metadata: Self = serde_json::from_str(text).map_err(|source| KbError::Json {
            name: name.to_string(),
            source,
        })?;
        log::debug!("Loaded {} creator(s) from {}", metadata.creators.len(), name);
        Ok(metadata)
    }

    /// Every creator ORCID, in file order
    pub fn orcids(&self) -> Vec<String> {
        self.creators
            .iter()
            .filter_map(Creator::orcid)
            .map(str::to_string)
            .collect()
    }
}
