//! Request-level extractors and cookie plumbing shared across handlers.
//!
//! - [`auth::AuthSession`] -- validates the session token from the `token` cookie or a Bearer header.
//! - [`csrf::CsrfGuard`] -- double-submit CSRF check; mutating handlers take it as an argument.
//! - [`cookies`] -- cookie parsing and `Set-Cookie` builders.

pub mod auth;
pub mod cookies;
pub mod csrf;
