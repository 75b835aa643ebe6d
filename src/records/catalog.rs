use serde::Deserialize;

/// A published protocol
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Protocol {
    /// Protocol name
    #[serde(rename = "Name")]
    pub name: Option<String>,
    /// Short description
    #[serde(rename = "Description")]
    pub description: Option<String>,
    /// DOI of the protocol
    #[serde(rename = "DOI")]
    pub doi: Option<String>,
}

/// A tutorial video hosted on YouTube
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Video {
    /// Video title
    #[serde(rename = "Title")]
    pub title: Option<String>,
    /// Short description
    #[serde(rename = "Description")]
    pub description: Option<String>,
    /// YouTube video id (11 characters)
    #[serde(rename = "YouTube ID")]
    pub youtube_id: Option<String>,
}

/// A public dataset
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Dataset {
    /// Dataset name
    #[serde(rename = "Name")]
    pub name: Option<String>,
    /// Short description
    #[serde(rename = "Description")]
    pub description: Option<String>,
    /// DOI of the dataset
    #[serde(rename = "DOI")]
    pub doi: Option<String>,
}

/// A software package
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Software {
    /// Package name
    #[serde(rename = "Name")]
    pub name: Option<String>,
    /// Short description
    #[serde(rename = "Description")]
    pub description: Option<String>,
    /// Project website or repository
    #[serde(rename = "URL")]
    pub url: Option<String>,
    /// Implementation language
    #[serde(rename = "Language")]
    pub language: Option<String>,
}
