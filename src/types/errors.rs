use std::fmt;

// === LinkError ===

/// Errors related to saved-link persistence operations.
#[derive(Debug)]
pub enum LinkError {
    /// Link with the given ID was not found for the owner.
    NotFound(String),
    /// No user is signed in.
    NotAuthenticated,
    /// Database operation failed.
    DatabaseError(String),
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkError::NotFound(id) => write!(f, "Link not found: {}", id),
            LinkError::NotAuthenticated => write!(f, "Not signed in"),
            LinkError::DatabaseError(msg) => write!(f, "Link database error: {}", msg),
        }
    }
}

impl std::error::Error for LinkError {}

// === AuthError ===

/// Errors raised by the identity backend.
///
/// The `Display` strings are the backend's error codes; `user_message`
/// maps the known codes to localized user-facing text.
#[derive(Debug)]
pub enum AuthError {
    /// Email/password pair did not match an account.
    InvalidCredentials,
    /// An account with this email already exists.
    AlreadyRegistered,
    /// The account exists but its email was never confirmed.
    EmailNotConfirmed,
    /// No active session for the requested operation.
    SessionMissing,
    /// Database operation failed.
    DatabaseError(String),
    /// Hashing or token generation failed.
    CryptoError(String),
}

impl AuthError {
    /// Localized user-facing message.
    ///
    /// Known backend codes map to fixed strings; anything else passes
    /// through unchanged.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::InvalidCredentials => "Credenciales inválidas".to_string(),
            AuthError::AlreadyRegistered => "El usuario ya está registrado".to_string(),
            AuthError::EmailNotConfirmed => "Email no confirmado".to_string(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::InvalidCredentials => write!(f, "Invalid login credentials"),
            AuthError::AlreadyRegistered => write!(f, "User already registered"),
            AuthError::EmailNotConfirmed => write!(f, "Email not confirmed"),
            AuthError::SessionMissing => write!(f, "Auth session missing"),
            AuthError::DatabaseError(msg) => write!(f, "Auth database error: {}", msg),
            AuthError::CryptoError(msg) => write!(f, "Auth crypto error: {}", msg),
        }
    }
}

impl std::error::Error for AuthError {}

// === MetadataError ===

/// Errors internal to metadata resolution.
///
/// These never cross the extractor's public boundary — `extract` absorbs
/// them into fallback triples. The HTTP endpoint uses them to pick its
/// status code.
#[derive(Debug)]
pub enum MetadataError {
    /// The page or API could not be fetched.
    Network(String),
    /// The response could not be read or decoded.
    InvalidResponse(String),
    /// The unfurling API reported a failure.
    UnfurlFailed(String),
}

impl fmt::Display for MetadataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataError::Network(msg) => write!(f, "Metadata fetch failed: {}", msg),
            MetadataError::InvalidResponse(msg) => {
                write!(f, "Metadata response invalid: {}", msg)
            }
            MetadataError::UnfurlFailed(msg) => write!(f, "Unfurl request failed: {}", msg),
        }
    }
}

impl std::error::Error for MetadataError {}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}
