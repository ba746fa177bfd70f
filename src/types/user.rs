use serde::{Deserialize, Serialize};

/// An account in the local identity backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub created_at: i64,
}

/// An active sign-in: an opaque token plus the signed-in user.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}
