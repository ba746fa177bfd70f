//! Auth Service for Linkstash.
//!
//! Local identity backend: account creation, password sign-in, and opaque
//! session tokens, backed by SQLite + CryptoService. Known backend error
//! codes map to localized user-facing strings via `AuthError::user_message`.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::params;
use uuid::Uuid;
use zeroize::Zeroize;

use crate::database::connection::Database;
use crate::services::crypto_service::{CryptoService, CryptoServiceTrait};
use crate::types::errors::AuthError;
use crate::types::user::{AuthSession, User};

/// Trait defining identity operations.
pub trait AuthServiceTrait {
    fn sign_up(&mut self, email: &str, password: &str) -> Result<User, AuthError>;
    fn sign_in(&mut self, email: &str, password: &str) -> Result<User, AuthError>;
    fn sign_out(&mut self) -> Result<(), AuthError>;
    fn current_user(&self) -> Option<&User>;
    fn is_authenticated(&self) -> bool;
}

/// One account row as stored in the `users` table.
struct AccountRow {
    id: String,
    email: String,
    password_hash: Vec<u8>,
    salt: Vec<u8>,
    email_confirmed: bool,
    created_at: i64,
}

/// Identity backend over SQLite.
pub struct AuthService {
    db: Arc<Database>,
    crypto: CryptoService,
    session: Option<AuthSession>,
}

impl AuthService {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            db,
            crypto: CryptoService::new(),
            session: None,
        }
    }

    /// Returns the current UNIX timestamp in seconds.
    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }

    /// Looks up an account row by email.
    fn find_account(&self, email: &str) -> Result<Option<AccountRow>, AuthError> {
        let conn = self.db.connection();
        let result = conn.query_row(
            "SELECT id, email, password_hash, salt, email_confirmed, created_at \
             FROM users WHERE email = ?1",
            params![email],
            |row| {
                Ok(AccountRow {
                    id: row.get(0)?,
                    email: row.get(1)?,
                    password_hash: row.get(2)?,
                    salt: row.get(3)?,
                    email_confirmed: row.get::<_, i64>(4)? != 0,
                    created_at: row.get(5)?,
                })
            },
        );
        match result {
            Ok(row) => Ok(Some(row)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AuthError::DatabaseError(e.to_string())),
        }
    }

    /// Records a session row and keeps the session in memory.
    fn open_session(&mut self, user: User) -> Result<(), AuthError> {
        let token = self.crypto.generate_token()?;
        self.db
            .connection()
            .execute(
                "INSERT INTO auth_sessions (token, user_id, created_at) VALUES (?1, ?2, ?3)",
                params![token, user.id, Self::now()],
            )
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?;
        self.session = Some(AuthSession { token, user });
        Ok(())
    }
}

impl AuthServiceTrait for AuthService {
    /// Creates an account and opens a session for it.
    fn sign_up(&mut self, email: &str, password: &str) -> Result<User, AuthError> {
        if self.find_account(email)?.is_some() {
            return Err(AuthError::AlreadyRegistered);
        }

        let salt = self.crypto.generate_salt()?;
        let mut hash = self.crypto.derive_hash(password, &salt)?;

        let id = Uuid::new_v4().to_string();
        let created_at = Self::now();
        let inserted = self.db.connection().execute(
            "INSERT INTO users (id, email, password_hash, salt, email_confirmed, created_at) \
             VALUES (?1, ?2, ?3, ?4, 1, ?5)",
            params![id, email, hash, salt, created_at],
        );
        hash.zeroize();
        inserted.map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        let user = User {
            id,
            email: email.to_string(),
            created_at,
        };
        self.open_session(user.clone())?;
        Ok(user)
    }

    /// Verifies the password and opens a session.
    fn sign_in(&mut self, email: &str, password: &str) -> Result<User, AuthError> {
        let Some(account) = self.find_account(email)? else {
            return Err(AuthError::InvalidCredentials);
        };

        if !self
            .crypto
            .verify_password(password, &account.salt, &account.password_hash)
        {
            return Err(AuthError::InvalidCredentials);
        }

        if !account.email_confirmed {
            return Err(AuthError::EmailNotConfirmed);
        }

        let user = User {
            id: account.id,
            email: account.email,
            created_at: account.created_at,
        };
        self.open_session(user.clone())?;
        Ok(user)
    }

    /// Closes the active session.
    fn sign_out(&mut self) -> Result<(), AuthError> {
        let Some(session) = self.session.take() else {
            return Err(AuthError::SessionMissing);
        };
        self.db
            .connection()
            .execute(
                "DELETE FROM auth_sessions WHERE token = ?1",
                params![session.token],
            )
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    fn current_user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }

    fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }
}
