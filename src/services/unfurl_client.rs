//! Client for a third-party unfurling API.
//!
//! The API is queried as `GET <endpoint>?url=<encoded>` and answers with
//! `{status, data: {title, description, logo: {url}}}`. A `status` of
//! `"fail"` is treated as an error.

use reqwest::Url;
use serde::Deserialize;

use crate::types::errors::MetadataError;
use crate::types::metadata::{PageMetadata, FALLBACK_DESCRIPTION};

#[derive(Debug, Deserialize)]
struct UnfurlResponse {
    status: String,
    data: Option<UnfurlData>,
}

#[derive(Debug, Deserialize)]
struct UnfurlData {
    title: Option<String>,
    description: Option<String>,
    logo: Option<UnfurlLogo>,
}

#[derive(Debug, Deserialize)]
struct UnfurlLogo {
    url: String,
}

/// Thin client over the unfurling endpoint.
pub struct UnfurlClient {
    client: reqwest::Client,
    endpoint: String,
}

impl UnfurlClient {
    pub fn new(client: reqwest::Client, endpoint: String) -> Self {
        Self { client, endpoint }
    }

    /// Asks the API to unfurl `target`. Single attempt, no retries.
    pub async fn fetch(&self, target: &Url) -> Result<PageMetadata, MetadataError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("url", target.as_str())])
            .send()
            .await
            .map_err(|e| MetadataError::Network(e.to_string()))?;

        let body: UnfurlResponse = response
            .json()
            .await
            .map_err(|e| MetadataError::InvalidResponse(e.to_string()))?;

        if body.status == "fail" {
            return Err(MetadataError::UnfurlFailed(format!(
                "unfurl status 'fail' for {}",
                target
            )));
        }

        let data = body
            .data
            .ok_or_else(|| MetadataError::InvalidResponse("missing data".to_string()))?;

        let host = target.host_str().unwrap_or_default();
        Ok(PageMetadata {
            title: data
                .title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| host.to_string()),
            description: data
                .description
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| FALLBACK_DESCRIPTION.to_string()),
            favicon: data.logo.map(|l| l.url).unwrap_or_default(),
        })
    }
}
