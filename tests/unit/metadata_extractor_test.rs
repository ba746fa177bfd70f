//! Unit tests for the Metadata Extractor: the HTML priority chain, URL
//! normalization, and the total-fallback contract of `extract`.

use linkstash::services::metadata_extractor::{parse_page, MetadataExtractor};
use linkstash::types::metadata::{FALLBACK_DESCRIPTION, INVALID_URL_TITLE};
use reqwest::Url;
use serde_json::json;

fn page_url() -> Url {
    Url::parse("https://blog.example.com/posts/1").unwrap()
}

// ─── Title chain ───

#[test]
fn test_title_from_title_tag() {
    let html = "<html><head><title>  My Post </title></head><body></body></html>";
    let meta = parse_page(html, &page_url());
    assert_eq!(meta.title, "My Post");
}

#[test]
fn test_title_tag_is_case_insensitive() {
    let html = "<HTML><TITLE>Shouting</TITLE></HTML>";
    let meta = parse_page(html, &page_url());
    assert_eq!(meta.title, "Shouting");
}

#[test]
fn test_title_falls_back_to_og_title() {
    let html = r#"<head><meta property="og:title" content="OG Title"></head>"#;
    let meta = parse_page(html, &page_url());
    assert_eq!(meta.title, "OG Title");
}

#[test]
fn test_empty_title_tag_falls_back_to_og_title() {
    let html = r#"<head><title>   </title><meta property="og:title" content="OG Title"></head>"#;
    let meta = parse_page(html, &page_url());
    assert_eq!(meta.title, "OG Title");
}

#[test]
fn test_title_falls_back_to_hostname() {
    let meta = parse_page("<html><body>nothing here</body></html>", &page_url());
    assert_eq!(meta.title, "blog.example.com");
}

// ─── Description chain ───

#[test]
fn test_description_prefers_meta_description() {
    let html = r#"<head>
        <meta name="description" content="Plain description">
        <meta property="og:description" content="OG description">
    </head>"#;
    let meta = parse_page(html, &page_url());
    assert_eq!(meta.description, "Plain description");
}

#[test]
fn test_description_falls_back_to_og_description() {
    let html = r#"<head><meta property="og:description" content="OG description"></head>"#;
    let meta = parse_page(html, &page_url());
    assert_eq!(meta.description, "OG description");
}

#[test]
fn test_description_fixed_fallback() {
    let meta = parse_page("<html></html>", &page_url());
    assert_eq!(meta.description, FALLBACK_DESCRIPTION);
}

#[test]
fn test_attribute_order_does_not_matter() {
    let html = r#"<head><meta content="Reversed" name="description"></head>"#;
    let meta = parse_page(html, &page_url());
    assert_eq!(meta.description, "Reversed");
}

// ─── Favicon chain ───

#[test]
fn test_favicon_rel_icon() {
    let html = r#"<head><link rel="icon" href="https://cdn.example.com/fav.png"></head>"#;
    let meta = parse_page(html, &page_url());
    assert_eq!(meta.favicon, "https://cdn.example.com/fav.png");
}

#[test]
fn test_favicon_shortcut_icon() {
    let html = r#"<head><link rel="shortcut icon" href="/shortcut.ico"></head>"#;
    let meta = parse_page(html, &page_url());
    assert_eq!(meta.favicon, "https://blog.example.com/shortcut.ico");
}

#[test]
fn test_favicon_defaults_to_site_root() {
    let meta = parse_page("<html></html>", &page_url());
    assert_eq!(meta.favicon, "https://blog.example.com/favicon.ico");
}

/// Relative favicon paths resolve against the page origin, not the page
/// path.
#[test]
fn test_relative_favicon_resolves_against_origin() {
    let html = r#"<head><link rel="icon" href="fav.png"></head>"#;
    let meta = parse_page(html, &page_url());
    assert_eq!(meta.favicon, "https://blog.example.com/fav.png");

    let html = r#"<head><link rel="icon" href="/static/fav.png"></head>"#;
    let meta = parse_page(html, &page_url());
    assert_eq!(meta.favicon, "https://blog.example.com/static/fav.png");
}

// ─── URL normalization ───

#[test]
fn test_normalize_url_prefixes_https() {
    assert_eq!(
        MetadataExtractor::normalize_url("example.com"),
        "https://example.com"
    );
    assert_eq!(
        MetadataExtractor::normalize_url("http://example.com"),
        "http://example.com"
    );
    assert_eq!(
        MetadataExtractor::normalize_url("https://example.com"),
        "https://example.com"
    );
}

// ─── Total fallback contract ───

/// Input that still fails URL parsing after normalization keeps the raw
/// input as the title.
#[tokio::test]
async fn test_unparseable_input_uses_raw_title() {
    let extractor = MetadataExtractor::new();
    let meta = extractor.extract("not a url").await;
    assert_eq!(meta.title, "not a url");
    assert_eq!(meta.description, "");
    assert_eq!(meta.favicon, "");
}

/// A fetch failure falls back to the hostname triple. `.invalid` is a
/// reserved TLD, so resolution fails without any network dependency.
#[tokio::test]
async fn test_fetch_failure_falls_back_to_hostname() {
    let extractor = MetadataExtractor::new();
    let meta = extractor.extract("https://linkstash-test.invalid/page").await;
    assert_eq!(meta.title, "linkstash-test.invalid");
    assert_eq!(meta.description, FALLBACK_DESCRIPTION);
    assert_eq!(meta.favicon, "");
}

#[tokio::test]
async fn test_non_string_values_get_invalid_url_triple() {
    let extractor = MetadataExtractor::new();
    for value in [json!(42), json!(null), json!(["x"]), json!({"url": "y"})] {
        let meta = extractor.extract_value(&value).await;
        assert_eq!(meta.title, INVALID_URL_TITLE);
        assert_eq!(meta.description, FALLBACK_DESCRIPTION);
        assert_eq!(meta.favicon, "");
    }
}

#[tokio::test]
async fn test_extract_value_with_string_behaves_like_extract() {
    let extractor = MetadataExtractor::new();
    let meta = extractor.extract_value(&json!("other.invalid")).await;
    assert_eq!(meta.title, "other.invalid");
}

/// The unfurl variant absorbs endpoint failures the same way: the caller
/// still gets the hostname triple.
#[tokio::test]
async fn test_unfurl_endpoint_failure_falls_back_to_hostname() {
    use linkstash::services::metadata_extractor::MetadataSource;

    let extractor = MetadataExtractor::with_source(MetadataSource::Unfurl(
        "https://unfurl-endpoint.invalid".to_string(),
    ));
    let meta = extractor.extract("https://example.com/page").await;
    assert_eq!(meta.title, "example.com");
    assert_eq!(meta.description, FALLBACK_DESCRIPTION);
    assert_eq!(meta.favicon, "");
}
