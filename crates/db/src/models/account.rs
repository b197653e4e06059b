//! Account (tenant) entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;

use nippo_core::types::{DbId, Timestamp};

/// Full account row from the `accounts` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`AccountResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct Account {
    pub id: DbId,
    /// Short login code, unique across all accounts.
    pub code: String,
    pub fullname: String,
    pub password_hash: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe account representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct AccountResponse {
    pub id: DbId,
    pub code: String,
    pub fullname: String,
    pub created_at: Timestamp,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            code: account.code,
            fullname: account.fullname,
            created_at: account.created_at,
        }
    }
}

/// DTO for creating a new account. The password is hashed before this
/// struct is built.
#[derive(Debug)]
pub struct CreateAccount {
    pub code: String,
    pub fullname: String,
    pub password_hash: String,
}
