use serde::{Deserialize, Serialize};

use super::filter::ViewMode;

/// Which backend the metadata extractor talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetadataSourceKind {
    /// Fetch the page directly and scan its HTML.
    #[default]
    Page,
    /// Ask the configured unfurling API.
    Unfurl,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    pub default_view: ViewMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataSettings {
    pub source: MetadataSourceKind,
    pub unfurl_endpoint: String,
}

impl Default for MetadataSettings {
    fn default() -> Self {
        Self {
            source: MetadataSourceKind::Page,
            unfurl_endpoint: "https://api.microlink.io".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Bind address for the metadata HTTP service.
    pub metadata_bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            metadata_bind: "127.0.0.1:3000".to_string(),
        }
    }
}

/// All user-facing settings, persisted as JSON at the platform config path.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub general: GeneralSettings,
    pub metadata: MetadataSettings,
    pub server: ServerSettings,
}
