use serde::Deserialize;

/// One column of the reagent data dictionary
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DictionaryEntry {
    /// Column name in the reagent table
    #[serde(rename = "Column Name")]
    pub column: Option<String>,
    /// What the column holds
    #[serde(rename = "Description")]
    pub description: Option<String>,
    /// Whether a value is required (`Yes`/`No`)
    #[serde(rename = "Required")]
    pub required: Option<String>,
}

/// One glossary term
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GlossaryTerm {
    /// The term
    #[serde(rename = "Term")]
    pub term: Option<String>,
    /// Its definition
    #[serde(rename = "Definition")]
    pub definition: Option<String>,
}
