//! User entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;

use nippo_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    /// Login name, unique across all users.
    pub username: String,
    pub fullname: String,
    pub password_hash: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub fullname: String,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            fullname: user.fullname,
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a new user. The password is hashed before this struct
/// is built.
#[derive(Debug)]
pub struct CreateUser {
    pub username: String,
    pub fullname: String,
    pub password_hash: String,
}
