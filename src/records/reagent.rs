use serde::Deserialize;

/// Column names of the reagent resources table
pub mod columns {
    /// Target name or protein biomarker
    pub const TARGET: &str = "Target Name / Protein Biomarker";
    /// Species of the target
    pub const TARGET_SPECIES: &str = "Target Species";
    /// Antibody clone
    pub const CLONE: &str = "Clone";
    /// Host organism
    pub const HOST_ORGANISM: &str = "Host Organism";
    /// Isotype
    pub const ISOTYPE: &str = "Isotype";
    /// Conjugate (fluorophore or `Unconjugated`)
    pub const CONJUGATE: &str = "Conjugate";
    /// Vendor name, resolved against the vendor table
    pub const VENDOR: &str = "Vendor";
    /// Vendor catalog number
    pub const CATALOG_NUMBER: &str = "Catalog Number";
    /// Lot number
    pub const LOT_NUMBER: &str = "Lot Number";
    /// UniProt accession of the target
    pub const UNIPROT: &str = "Uniprot Accession Number";
    /// Whether the reagent is recommended
    pub const RECOMMENDED: &str = "Recommended";
    /// ORCID of the contributor
    pub const CONTRIBUTOR: &str = "Contributor";
    /// ORCIDs agreeing with the recommendation
    pub const AGREE: &str = "Agree";
    /// ORCIDs disagreeing with the recommendation
    pub const DISAGREE: &str = "Disagree";
    /// Supporting image files, `;` separated
    pub const IMAGE_FILES: &str = "Image Files";
    /// Image captions, `;` separated
    pub const CAPTIONS: &str = "Captions";
    /// Image MD5 hashes, `;` separated
    pub const MD5: &str = "MD5";
    /// Vendor table: vendor name
    pub const VENDOR_NAME: &str = "Vendor";
    /// Vendor table: vendor website
    pub const VENDOR_URL: &str = "URL";

    /// Columns naming the people behind a row
    pub const CONTRIBUTOR_COLUMNS: [&str; 3] = [CONTRIBUTOR, AGREE, DISAGREE];

    /// Columns describing supporting images
    pub const IMAGE_COLUMNS: [&str; 3] = [IMAGE_FILES, CAPTIONS, MD5];
}

/// One validated antibody/reagent configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Reagent {
    /// Target name or protein biomarker
    #[serde(rename = "Target Name / Protein Biomarker")]
    pub target: Option<String>,
    /// Species of the target
    #[serde(rename = "Target Species")]
    pub target_species: Option<String>,
    /// Antibody clone
    #[serde(rename = "Clone")]
    pub clone: Option<String>,
    /// Host organism
    #[serde(rename = "Host Organism")]
    pub host_organism: Option<String>,
    /// Isotype
    #[serde(rename = "Isotype")]
    pub isotype: Option<String>,
    /// Conjugate
    #[serde(rename = "Conjugate")]
    pub conjugate: Option<String>,
    /// Vendor name
    #[serde(rename = "Vendor")]
    pub vendor: Option<String>,
    /// Vendor catalog number
    #[serde(rename = "Catalog Number")]
    pub catalog_number: Option<String>,
    /// Lot number
    #[serde(rename = "Lot Number")]
    pub lot_number: Option<String>,
    /// UniProt accession
    #[serde(rename = "Uniprot Accession Number")]
    pub uniprot: Option<String>,
    /// Recommendation (`Yes`/`No`)
    #[serde(rename = "Recommended")]
    pub recommended: Option<String>,
    /// Contributor ORCID
    #[serde(rename = "Contributor")]
    pub contributor: Option<String>,
    /// Agreeing ORCIDs
    #[serde(rename = "Agree")]
    pub agree: Option<String>,
    /// Disagreeing ORCIDs
    #[serde(rename = "Disagree")]
    pub disagree: Option<String>,
    /// Image files
    #[serde(rename = "Image Files")]
    pub image_files: Option<String>,
    /// Image captions
    #[serde(rename = "Captions")]
    pub captions: Option<String>,
    /// Image hashes
    #[serde(rename = "MD5")]
    pub md5: Option<String>,
}

impl Reagent {
    /// Identifier used in reports: `target conjugate (catalog number)`
    pub fn id(&self) -> String {
        let target = self.target.as_deref().unwrap_or("?");
        let conjugate = self.conjugate.as_deref().unwrap_or("?");
        match self.catalog_number.as_deref() {
            Some(catalog) if !catalog.is_empty() => {
                format!("{} {} ({})", target, conjugate, catalog)
            }
            _ => format!("{} {}", target, conjugate),
        }
    }
}

/// A vendor and its website
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Vendor {
    /// Vendor name as written in the reagent table
    #[serde(rename = "Vendor")]
    pub name: Option<String>,
    /// Vendor website
    #[serde(rename = "URL")]
    pub url: Option<String>,
}
