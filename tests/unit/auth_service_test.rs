//! Unit tests for the AuthService: registration, sign-in, sessions, and
//! the backend-code-to-localized-message mapping.

use std::sync::Arc;

use linkstash::database::Database;
use linkstash::services::auth_service::{AuthService, AuthServiceTrait};
use linkstash::types::errors::AuthError;

fn setup() -> (Arc<Database>, AuthService) {
    let db = Arc::new(Database::open_in_memory().expect("Failed to open in-memory database"));
    let auth = AuthService::new(db.clone());
    (db, auth)
}

#[test]
fn test_sign_up_then_sign_in() {
    let (_db, mut auth) = setup();

    let created = auth.sign_up("user@example.com", "hunter22").unwrap();
    assert!(auth.is_authenticated());
    auth.sign_out().unwrap();
    assert!(!auth.is_authenticated());

    let signed_in = auth.sign_in("user@example.com", "hunter22").unwrap();
    assert_eq!(signed_in.id, created.id);
    assert_eq!(auth.current_user().map(|u| u.email.as_str()), Some("user@example.com"));
}

#[test]
fn test_wrong_password_is_invalid_credentials() {
    let (_db, mut auth) = setup();
    auth.sign_up("user@example.com", "hunter22").unwrap();
    auth.sign_out().unwrap();

    let err = auth.sign_in("user@example.com", "wrong").unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
    assert_eq!(err.to_string(), "Invalid login credentials");
    assert_eq!(err.user_message(), "Credenciales inválidas");
}

#[test]
fn test_unknown_email_is_invalid_credentials() {
    let (_db, mut auth) = setup();
    let err = auth.sign_in("nobody@example.com", "whatever").unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
}

#[test]
fn test_duplicate_sign_up_is_already_registered() {
    let (_db, mut auth) = setup();
    auth.sign_up("user@example.com", "hunter22").unwrap();

    let err = auth.sign_up("user@example.com", "different").unwrap_err();
    assert!(matches!(err, AuthError::AlreadyRegistered));
    assert_eq!(err.user_message(), "El usuario ya está registrado");
}

#[test]
fn test_sign_out_without_session_is_missing() {
    let (_db, mut auth) = setup();
    let err = auth.sign_out().unwrap_err();
    assert!(matches!(err, AuthError::SessionMissing));
}

#[test]
fn test_unconfirmed_email_is_rejected() {
    let (db, mut auth) = setup();
    auth.sign_up("user@example.com", "hunter22").unwrap();
    auth.sign_out().unwrap();

    db.connection()
        .execute(
            "UPDATE users SET email_confirmed = 0 WHERE email = 'user@example.com'",
            [],
        )
        .unwrap();

    let err = auth.sign_in("user@example.com", "hunter22").unwrap_err();
    assert!(matches!(err, AuthError::EmailNotConfirmed));
    assert_eq!(err.user_message(), "Email no confirmado");
}

/// Each sign-in records a session row; sign-out removes it.
#[test]
fn test_session_rows_follow_sign_in_and_out() {
    let (db, mut auth) = setup();
    auth.sign_up("user@example.com", "hunter22").unwrap();

    let count = |db: &Database| -> i64 {
        db.connection()
            .query_row("SELECT COUNT(*) FROM auth_sessions", [], |row| row.get(0))
            .unwrap()
    };
    assert_eq!(count(&db), 1);

    auth.sign_out().unwrap();
    assert_eq!(count(&db), 0);
}
