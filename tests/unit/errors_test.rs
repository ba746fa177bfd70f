//! Unit tests for error Display strings and the auth error localization
//! mapping.

use std::error::Error;

use linkstash::types::errors::{AuthError, LinkError, MetadataError, SettingsError};

#[test]
fn test_link_error_display() {
    assert_eq!(
        LinkError::NotFound("abc".to_string()).to_string(),
        "Link not found: abc"
    );
    assert_eq!(LinkError::NotAuthenticated.to_string(), "Not signed in");
    assert_eq!(
        LinkError::DatabaseError("disk full".to_string()).to_string(),
        "Link database error: disk full"
    );
}

#[test]
fn test_auth_error_codes() {
    assert_eq!(
        AuthError::InvalidCredentials.to_string(),
        "Invalid login credentials"
    );
    assert_eq!(
        AuthError::AlreadyRegistered.to_string(),
        "User already registered"
    );
    assert_eq!(
        AuthError::EmailNotConfirmed.to_string(),
        "Email not confirmed"
    );
    assert_eq!(AuthError::SessionMissing.to_string(), "Auth session missing");
}

/// The three known backend codes map to localized strings; anything else
/// passes through unchanged.
#[test]
fn test_auth_error_user_messages() {
    assert_eq!(
        AuthError::InvalidCredentials.user_message(),
        "Credenciales inválidas"
    );
    assert_eq!(
        AuthError::AlreadyRegistered.user_message(),
        "El usuario ya está registrado"
    );
    assert_eq!(
        AuthError::EmailNotConfirmed.user_message(),
        "Email no confirmado"
    );
    assert_eq!(
        AuthError::DatabaseError("boom".to_string()).user_message(),
        "Auth database error: boom"
    );
    assert_eq!(
        AuthError::CryptoError("rng".to_string()).user_message(),
        "Auth crypto error: rng"
    );
}

#[test]
fn test_metadata_error_display() {
    assert_eq!(
        MetadataError::Network("timeout".to_string()).to_string(),
        "Metadata fetch failed: timeout"
    );
    assert_eq!(
        MetadataError::InvalidResponse("bad json".to_string()).to_string(),
        "Metadata response invalid: bad json"
    );
    assert_eq!(
        MetadataError::UnfurlFailed("status fail".to_string()).to_string(),
        "Unfurl request failed: status fail"
    );
}

#[test]
fn test_settings_error_display() {
    assert_eq!(
        SettingsError::IoError("denied".to_string()).to_string(),
        "Settings I/O error: denied"
    );
    assert_eq!(
        SettingsError::SerializationError("eof".to_string()).to_string(),
        "Settings serialization error: eof"
    );
}

#[test]
fn test_errors_implement_std_error() {
    let errors: Vec<Box<dyn Error>> = vec![
        Box::new(LinkError::NotAuthenticated),
        Box::new(AuthError::InvalidCredentials),
        Box::new(MetadataError::Network("x".to_string())),
        Box::new(SettingsError::IoError("x".to_string())),
    ];
    for err in errors {
        assert!(!err.to_string().is_empty());
    }
}
