//! Crypto Service for Linkstash.
//!
//! Password hashing and session-token generation for the auth service,
//! built on `ring` (PBKDF2-HMAC-SHA256, OS randomness).

use std::num::NonZeroU32;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use ring::pbkdf2;
use ring::rand::{SecureRandom, SystemRandom};

use crate::types::errors::AuthError;

/// PBKDF2 iteration count for password hashing.
const PBKDF2_ITERATIONS: u32 = 100_000;

/// Salt length in bytes.
const SALT_LENGTH: usize = 16;

/// Derived hash length in bytes.
const HASH_LENGTH: usize = 32;

/// Session token entropy in bytes (before base64 encoding).
const TOKEN_LENGTH: usize = 32;

/// Trait defining the credential-hashing operations used by the auth service.
pub trait CryptoServiceTrait {
    /// Derives a password hash from a password and salt using PBKDF2.
    fn derive_hash(&self, password: &str, salt: &[u8]) -> Result<Vec<u8>, AuthError>;

    /// Verifies a password against a stored hash in constant time.
    fn verify_password(&self, password: &str, salt: &[u8], expected: &[u8]) -> bool;

    /// Generates a cryptographically secure random salt.
    fn generate_salt(&self) -> Result<Vec<u8>, AuthError>;

    /// Generates an opaque URL-safe session token.
    fn generate_token(&self) -> Result<String, AuthError>;
}

/// Implementation of credential hashing using the `ring` crate.
pub struct CryptoService {
    rng: SystemRandom,
}

impl CryptoService {
    pub fn new() -> Self {
        Self {
            rng: SystemRandom::new(),
        }
    }
}

impl Default for CryptoService {
    fn default() -> Self {
        Self::new()
    }
}

impl CryptoServiceTrait for CryptoService {
    fn derive_hash(&self, password: &str, salt: &[u8]) -> Result<Vec<u8>, AuthError> {
        let iterations = NonZeroU32::new(PBKDF2_ITERATIONS)
            .ok_or_else(|| AuthError::CryptoError("Invalid iteration count".to_string()))?;

        let mut hash = vec![0u8; HASH_LENGTH];
        pbkdf2::derive(
            pbkdf2::PBKDF2_HMAC_SHA256,
            iterations,
            salt,
            password.as_bytes(),
            &mut hash,
        );

        Ok(hash)
    }

    fn verify_password(&self, password: &str, salt: &[u8], expected: &[u8]) -> bool {
        let Some(iterations) = NonZeroU32::new(PBKDF2_ITERATIONS) else {
            return false;
        };
        pbkdf2::verify(
            pbkdf2::PBKDF2_HMAC_SHA256,
            iterations,
            salt,
            password.as_bytes(),
            expected,
        )
        .is_ok()
    }

    fn generate_salt(&self) -> Result<Vec<u8>, AuthError> {
        let mut salt = vec![0u8; SALT_LENGTH];
        self.rng
            .fill(&mut salt)
            .map_err(|_| AuthError::CryptoError("Failed to generate salt".to_string()))?;
        Ok(salt)
    }

    fn generate_token(&self) -> Result<String, AuthError> {
        let mut bytes = vec![0u8; TOKEN_LENGTH];
        self.rng
            .fill(&mut bytes)
            .map_err(|_| AuthError::CryptoError("Failed to generate token".to_string()))?;
        Ok(URL_SAFE_NO_PAD.encode(&bytes))
    }
}
