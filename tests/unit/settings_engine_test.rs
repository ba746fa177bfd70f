//! Unit tests for the SettingsEngine.

use linkstash::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use linkstash::types::errors::SettingsError;
use linkstash::types::filter::ViewMode;
use linkstash::types::settings::{AppSettings, MetadataSourceKind};
use tempfile::TempDir;

fn engine_in(tmp: &TempDir) -> SettingsEngine {
    let path = tmp.path().join("settings.json");
    SettingsEngine::new(Some(path.to_string_lossy().to_string()))
}

#[test]
fn test_load_missing_file_returns_defaults() {
    let tmp = TempDir::new().unwrap();
    let mut engine = engine_in(&tmp);

    let settings = engine.load().unwrap();
    assert_eq!(settings, AppSettings::default());
    assert_eq!(settings.general.default_view, ViewMode::Grid);
    assert_eq!(settings.metadata.source, MetadataSourceKind::Page);
    assert_eq!(settings.server.metadata_bind, "127.0.0.1:3000");
}

#[test]
fn test_save_then_load_roundtrip() {
    let tmp = TempDir::new().unwrap();
    let mut engine = engine_in(&tmp);

    let mut settings = AppSettings::default();
    settings.general.default_view = ViewMode::List;
    settings.metadata.source = MetadataSourceKind::Unfurl;
    settings.metadata.unfurl_endpoint = "https://unfurl.example.com".to_string();
    engine.set_settings(settings.clone());
    engine.save().unwrap();

    let mut reloaded = engine_in(&tmp);
    let loaded = reloaded.load().unwrap();
    assert_eq!(loaded, settings);
}

#[test]
fn test_malformed_file_is_serialization_error() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("settings.json");
    std::fs::write(&path, "not json at all").unwrap();

    let mut engine = SettingsEngine::new(Some(path.to_string_lossy().to_string()));
    let err = engine.load().unwrap_err();
    assert!(matches!(err, SettingsError::SerializationError(_)));
}

#[test]
fn test_reset_restores_defaults_and_saves() {
    let tmp = TempDir::new().unwrap();
    let mut engine = engine_in(&tmp);

    let mut settings = AppSettings::default();
    settings.general.default_view = ViewMode::List;
    engine.set_settings(settings);
    engine.save().unwrap();

    engine.reset().unwrap();
    assert_eq!(engine.get_settings(), &AppSettings::default());

    let mut reloaded = engine_in(&tmp);
    assert_eq!(reloaded.load().unwrap(), AppSettings::default());
}

/// Unknown keys in the file are ignored; missing sections fall back to
/// their defaults.
#[test]
fn test_partial_file_fills_defaults() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("settings.json");
    std::fs::write(&path, r#"{"general": {"default_view": "list"}}"#).unwrap();

    let mut engine = SettingsEngine::new(Some(path.to_string_lossy().to_string()));
    let settings = engine.load().unwrap();
    assert_eq!(settings.general.default_view, ViewMode::List);
    assert_eq!(settings.metadata, AppSettings::default().metadata);
}
