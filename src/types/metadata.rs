use serde::{Deserialize, Serialize};

/// Title used when the metadata request itself cannot be made.
pub const FALLBACK_TITLE: &str = "Unknown Title";
/// Description used whenever a page offers none.
pub const FALLBACK_DESCRIPTION: &str = "No description available";
/// Title used when the submitted value is not a URL string at all.
pub const INVALID_URL_TITLE: &str = "Invalid URL";

/// Page preview derived from a URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub favicon: String,
}

impl PageMetadata {
    /// Fallback triple for inputs that are not URL strings.
    pub fn invalid_url() -> Self {
        Self {
            title: INVALID_URL_TITLE.to_string(),
            description: FALLBACK_DESCRIPTION.to_string(),
            favicon: String::new(),
        }
    }

    /// Fixed fallback triple used when nothing could be fetched at all.
    pub fn unknown() -> Self {
        Self {
            title: FALLBACK_TITLE.to_string(),
            description: FALLBACK_DESCRIPTION.to_string(),
            favicon: String::new(),
        }
    }

    /// Fallback triple carrying the page hostname as the title.
    pub fn for_host(host: &str) -> Self {
        Self {
            title: host.to_string(),
            description: FALLBACK_DESCRIPTION.to_string(),
            favicon: String::new(),
        }
    }
}
