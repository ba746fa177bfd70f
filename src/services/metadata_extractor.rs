//! Metadata Extractor for Linkstash.
//!
//! Derives a `{title, description, favicon}` preview from a URL by fetching
//! the page (or asking the configured unfurling API) and scanning the HTML
//! with a fixed priority chain of lookups. Extraction never fails outward:
//! every error path produces a populated fallback triple, so a broken or
//! slow page cannot block saving a link.

use reqwest::Url;
use serde_json::Value;

use crate::types::errors::MetadataError;
use crate::types::metadata::{PageMetadata, FALLBACK_DESCRIPTION};
use crate::types::settings::{MetadataSettings, MetadataSourceKind};

use super::unfurl_client::UnfurlClient;

/// Where the extractor gets its data from.
#[derive(Debug, Clone)]
pub enum MetadataSource {
    /// Fetch the page and scan its HTML.
    PageFetch,
    /// Ask a third-party unfurling API at the given endpoint.
    Unfurl(String),
}

impl MetadataSource {
    pub fn from_settings(settings: &MetadataSettings) -> Self {
        match settings.source {
            MetadataSourceKind::Page => MetadataSource::PageFetch,
            MetadataSourceKind::Unfurl => {
                MetadataSource::Unfurl(settings.unfurl_endpoint.clone())
            }
        }
    }
}

/// Metadata extractor. Cheap to clone; the underlying HTTP client is shared.
#[derive(Debug, Clone)]
pub struct MetadataExtractor {
    client: reqwest::Client,
    source: MetadataSource,
}

impl MetadataExtractor {
    pub fn new() -> Self {
        Self::with_source(MetadataSource::PageFetch)
    }

    pub fn with_source(source: MetadataSource) -> Self {
        Self {
            client: reqwest::Client::new(),
            source,
        }
    }

    /// Prefixes `https://` when the input carries no HTTP scheme.
    pub fn normalize_url(input: &str) -> String {
        if input.starts_with("http://") || input.starts_with("https://") {
            input.to_string()
        } else {
            format!("https://{}", input)
        }
    }

    /// Derives a preview for a JSON value that should hold a URL string.
    ///
    /// Non-string values get the fixed "Invalid URL" triple.
    pub async fn extract_value(&self, value: &Value) -> PageMetadata {
        match value.as_str() {
            Some(url) => self.extract(url).await,
            None => PageMetadata::invalid_url(),
        }
    }

    /// Derives a preview for the given URL input. Never fails.
    ///
    /// A URL that cannot be parsed even after normalization falls back to
    /// the raw input as the title; a fetch or decode failure falls back to
    /// the page hostname.
    pub async fn extract(&self, input: &str) -> PageMetadata {
        let normalized = Self::normalize_url(input);
        let url = match Url::parse(&normalized) {
            Ok(url) => url,
            Err(_) => {
                return PageMetadata {
                    title: input.to_string(),
                    description: String::new(),
                    favicon: String::new(),
                }
            }
        };

        let host = url.host_str().unwrap_or(input).to_string();
        match self.resolve_parsed(&url).await {
            Ok(meta) => meta,
            Err(err) => {
                tracing::debug!(url = %url, error = %err, "metadata lookup failed, using fallback");
                PageMetadata::for_host(&host)
            }
        }
    }

    /// Fallible resolution for callers that need to distinguish success from
    /// failure — the HTTP endpoint picks its status code from this.
    pub async fn resolve(&self, input: &str) -> Result<PageMetadata, MetadataError> {
        let normalized = Self::normalize_url(input);
        let url =
            Url::parse(&normalized).map_err(|e| MetadataError::InvalidResponse(e.to_string()))?;
        self.resolve_parsed(&url).await
    }

    async fn resolve_parsed(&self, url: &Url) -> Result<PageMetadata, MetadataError> {
        match &self.source {
            MetadataSource::PageFetch => {
                let html = self.fetch_page(url).await?;
                Ok(parse_page(&html, url))
            }
            MetadataSource::Unfurl(endpoint) => {
                UnfurlClient::new(self.client.clone(), endpoint.clone())
                    .fetch(url)
                    .await
            }
        }
    }

    /// Single best-effort page fetch. No retries; timeouts are whatever the
    /// HTTP client defaults to.
    async fn fetch_page(&self, url: &Url) -> Result<String, MetadataError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| MetadataError::Network(e.to_string()))?;

        let response = response
            .error_for_status()
            .map_err(|e| MetadataError::Network(e.to_string()))?;

        response
            .text()
            .await
            .map_err(|e| MetadataError::InvalidResponse(e.to_string()))
    }
}

impl Default for MetadataExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Scans a fetched page for its preview fields.
///
/// Title: `<title>` text, then `og:title`, then the page hostname.
/// Description: `meta[name=description]`, then `og:description`, then the
/// fixed fallback. Favicon: `link[rel=icon]`, then `link[rel="shortcut
/// icon"]`, then `/favicon.ico`, resolved against the page origin.
pub fn parse_page(html: &str, page_url: &Url) -> PageMetadata {
    let title = extract_between_tags(html, "title")
        .map(|t| strip_tags(&t).trim().to_string())
        .filter(|t| !t.is_empty())
        .or_else(|| {
            find_meta_content(html, "property", "og:title")
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
        })
        .unwrap_or_else(|| page_url.host_str().unwrap_or_default().to_string());

    let description = find_meta_content(html, "name", "description")
        .or_else(|| find_meta_content(html, "property", "og:description"))
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| FALLBACK_DESCRIPTION.to_string());

    let favicon_href = find_link_href(html, "icon")
        .or_else(|| find_link_href(html, "shortcut icon"))
        .unwrap_or_else(|| "/favicon.ico".to_string());
    let favicon = resolve_favicon(&favicon_href, page_url);

    PageMetadata {
        title,
        description,
        favicon,
    }
}

/// Makes a favicon reference absolute against the page origin.
/// Already-absolute references are kept as-is.
fn resolve_favicon(href: &str, page_url: &Url) -> String {
    if href.starts_with("http") {
        return href.to_string();
    }
    let origin = page_url.origin().ascii_serialization();
    match Url::parse(&origin).and_then(|base| base.join(href)) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => String::new(),
    }
}

/// Strips HTML tags to get plain text.
fn strip_tags(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(ch),
            _ => {}
        }
    }
    result
}

/// Extracts content between the first occurrence of a tag pair.
///
/// Tag names are matched case-insensitively; byte offsets come from an
/// ASCII-lowered copy so slicing the original source stays valid.
fn extract_between_tags(html: &str, tag: &str) -> Option<String> {
    let lower = html.to_ascii_lowercase();
    let open = format!("<{}", tag);
    let close = format!("</{}>", tag);
    let start_idx = lower.find(&open)?;
    let tag_end = lower[start_idx..].find('>')?;
    let content_start = start_idx + tag_end + 1;
    let end_idx = lower[content_start..].find(&close)?;
    Some(html[content_start..content_start + end_idx].to_string())
}

/// Finds `<meta {key}="{value}">` and returns its `content` attribute.
fn find_meta_content(html: &str, key: &str, value: &str) -> Option<String> {
    find_tag_attr(html, "meta", key, value, "content")
}

/// Finds `<link rel="{rel}">` and returns its `href` attribute.
fn find_link_href(html: &str, rel: &str) -> Option<String> {
    find_tag_attr(html, "link", "rel", rel, "href")
}

/// Scans for a `<{tag} ...>` element whose `{key}` attribute equals
/// `{value}` and returns its `{attr}` attribute.
fn find_tag_attr(html: &str, tag: &str, key: &str, value: &str, attr: &str) -> Option<String> {
    let lower = html.to_ascii_lowercase();
    let open = format!("<{}", tag);
    let mut search_from = 0;
    while let Some(rel_idx) = lower[search_from..].find(&open) {
        let start = search_from + rel_idx;
        let Some(end_rel) = lower[start..].find('>') else {
            break;
        };
        let end = start + end_rel;
        let element = &html[start..=end];
        if attr_value(element, key).is_some_and(|v| v.eq_ignore_ascii_case(value)) {
            if let Some(found) = attr_value(element, attr) {
                return Some(found);
            }
        }
        search_from = end + 1;
    }
    None
}

/// Reads an attribute value out of a single element's source. Handles
/// double-quoted, single-quoted, and bare values.
fn attr_value(element: &str, attr: &str) -> Option<String> {
    let lower = element.to_ascii_lowercase();
    let needle = format!("{}=", attr);
    let mut search_from = 0;
    while let Some(rel_idx) = lower[search_from..].find(&needle) {
        let idx = search_from + rel_idx;
        // The attribute name must start at a whitespace boundary, or we
        // matched inside another attribute (e.g. data-content=).
        let preceded_by_space = idx > 0 && lower.as_bytes()[idx - 1].is_ascii_whitespace();
        if !preceded_by_space {
            search_from = idx + needle.len();
            continue;
        }
        let rest = &element[idx + needle.len()..];
        let mut chars = rest.chars();
        return match chars.next() {
            Some(quote @ ('"' | '\'')) => {
                let inner = &rest[1..];
                inner.find(quote).map(|end| inner[..end].to_string())
            }
            Some(_) => Some(
                rest.split(|c: char| c.is_ascii_whitespace() || c == '>' || c == '/')
                    .next()
                    .unwrap_or_default()
                    .to_string(),
            ),
            None => None,
        };
    }
    None
}
