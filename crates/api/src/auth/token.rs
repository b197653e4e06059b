//! Session-token issuance and validation.
//!
//! Tokens are HS256 JWTs signed with a key that is generated once and
//! persisted to a local file, so a server restart does not invalidate
//! every session. Claims carry the user id and, for account-scoped
//! logins, the account id.

use std::path::Path;

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::distr::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use nippo_core::error::CoreError;
use nippo_core::types::DbId;

/// Length of a freshly generated signing key, in characters.
const SIGNING_KEY_LENGTH: usize = 50;

/// Token signing and password-policy configuration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC key used to sign session tokens and CSRF cookies.
    pub signing_key: String,
    /// Session token lifetime in minutes.
    pub token_expiry_mins: i64,
    /// Minimum accepted password length at signup.
    pub min_password_length: usize,
}

impl AuthConfig {
    /// Load auth configuration from environment variables.
    ///
    /// | Env Var               | Default     |
    /// |-----------------------|-------------|
    /// | `TOKEN_KEY_FILE`      | `token.key` |
    /// | `TOKEN_EXPIRY_MINS`   | `1440`      |
    /// | `MIN_PASSWORD_LENGTH` | `8`         |
    ///
    /// The signing key is read from `TOKEN_KEY_FILE`; when the file does
    /// not exist yet a fresh key is generated and written there first.
    ///
    /// # Panics
    ///
    /// Panics when the key file cannot be read or created, or when a
    /// numeric variable is present but malformed.
    pub fn from_env() -> Self {
        let key_file =
            std::env::var("TOKEN_KEY_FILE").unwrap_or_else(|_| "token.key".into());
        let signing_key = load_or_generate_signing_key(Path::new(&key_file))
            .unwrap_or_else(|e| panic!("Cannot read or create signing key file '{key_file}': {e}"));

        let token_expiry_mins: i64 = std::env::var("TOKEN_EXPIRY_MINS")
            .unwrap_or_else(|_| "1440".into())
            .parse()
            .expect("TOKEN_EXPIRY_MINS must be a valid i64");

        let min_password_length: usize = std::env::var("MIN_PASSWORD_LENGTH")
            .unwrap_or_else(|_| "8".into())
            .parse()
            .expect("MIN_PASSWORD_LENGTH must be a valid usize");

        Self {
            signing_key,
            token_expiry_mins,
            min_password_length,
        }
    }
}

/// Read the signing key from `path`, generating and persisting a fresh
/// one on first start.
///
/// The generated key is 50 random alphanumeric characters. Whitespace
/// around a stored key is ignored so hand-edited files stay valid.
pub fn load_or_generate_signing_key(path: &Path) -> std::io::Result<String> {
    if path.exists() {
        let stored = std::fs::read_to_string(path)?;
        let key = stored.trim();
        if !key.is_empty() {
            return Ok(key.to_string());
        }
    }

    let key: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(SIGNING_KEY_LENGTH)
        .map(char::from)
        .collect();
    std::fs::write(path, &key)?;
    Ok(key)
}

/// JWT claims embedded in every session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: DbId,
    /// Account the session is scoped to; `None` for a plain login.
    pub account_id: Option<DbId>,
    /// Expiry (unix seconds).
    pub exp: i64,
    /// Issued-at (unix seconds).
    pub iat: i64,
    /// Unique token id.
    pub jti: String,
}

impl Claims {
    /// Return the account id this session is scoped to.
    ///
    /// Tenant-scoped endpoints (masters, reports) call this; a plain
    /// login without an account claim is rejected as forbidden, not
    /// unauthorized, because the token itself is valid.
    pub fn require_account(&self) -> Result<DbId, CoreError> {
        self.account_id.ok_or_else(|| {
            CoreError::Forbidden("Session is not scoped to an account".to_string())
        })
    }
}

/// Generate a signed session token for `user_id`, optionally scoped to
/// an account.
pub fn generate_token(
    user_id: DbId,
    account_id: Option<DbId>,
    config: &AuthConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id,
        account_id,
        exp: (now + chrono::Duration::minutes(config.token_expiry_mins)).timestamp(),
        iat: now.timestamp(),
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.signing_key.as_bytes()),
    )
}

/// Validate a session token's signature and expiry, returning its claims.
pub fn validate_token(token: &str, config: &AuthConfig) -> Result<Claims, CoreError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.signing_key.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| CoreError::Unauthorized(format!("Invalid token: {e}")))
}
