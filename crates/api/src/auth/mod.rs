//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`token`] -- session-token issuance and validation, plus the persisted signing key.
//! - [`csrf`] -- double-submit CSRF token minting and verification.

pub mod csrf;
pub mod password;
pub mod token;
