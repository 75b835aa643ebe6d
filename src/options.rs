//! Run options passed explicitly into every generator and validator.

use crate::linker::LinkOptions;

/// Base URLs and path prefixes used to derive links from identifiers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkBases {
    /// Prefix for DOI links
    pub doi_base: String,
    /// Prefix for ORCID profile links
    pub orcid_base: String,
    /// Prefix for UniProt entry links
    pub uniprot_base: String,
    /// Prefix for YouTube watch links
    pub youtube_watch_base: String,
    /// Prefix for YouTube thumbnail images
    pub youtube_thumbnail_base: String,
    /// Site path of the supporting material directory
    pub supporting_material_prefix: String,
}

impl Default for LinkBases {
    fn default() -> Self {
        Self {
            doi_base: "https://doi.org/".to_string(),
            orcid_base: "https://orcid.org/".to_string(),
            uniprot_base: "https://www.uniprot.org/uniprot/".to_string(),
            youtube_watch_base: "https://www.youtube.com/watch?v=".to_string(),
            youtube_thumbnail_base: "https://img.youtube.com/vi/".to_string(),
            supporting_material_prefix: "supporting_material".to_string(),
        }
    }
}

impl LinkBases {
    /// Link target for a DOI
    pub fn doi(&self, doi: &str) -> String {
        format!("{}{}", self.doi_base, doi.trim())
    }

    /// Link target for an ORCID
    pub fn orcid(&self, orcid: &str) -> String {
        format!("{}{}", self.orcid_base, orcid.trim())
    }

    /// Link target for a UniProt accession
    pub fn uniprot(&self, accession: &str) -> String {
        format!("{}{}", self.uniprot_base, accession.trim())
    }

    /// Watch page for a YouTube video id
    pub fn youtube_watch(&self, id: &str) -> String {
        format!("{}{}", self.youtube_watch_base, id.trim())
    }

    /// Thumbnail image for a YouTube video id
    pub fn youtube_thumbnail(&self, id: &str) -> String {
        format!("{}{}/0.jpg", self.youtube_thumbnail_base, id.trim())
    }

    /// Site link to a file below the supporting material directory
    pub fn supporting_material(&self, relative: &str) -> String {
        let prefix = self.supporting_material_prefix.trim_end_matches('/');
        if prefix.is_empty() {
            relative.to_string()
        } else {
            format!("{}/{}", prefix, relative)
        }
    }
}

/// Validation limits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Maximal number of ORCIDs in an Agree or Disagree cell
    pub max_orcid_entries: usize,
    /// File names ignored when looking for superfluous supporting files
    pub ignored_files: Vec<String>,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            max_orcid_entries: 5,
            ignored_files: vec![".DS_Store".to_string()],
        }
    }
}

/// Everything a generator or validator may be configured with
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Link derivation
    pub links: LinkBases,
    /// Failed row handling
    pub linking: LinkOptions,
    /// Validation limits
    pub validation: ValidationOptions,
}
