//! Double-submit CSRF verification for mutating endpoints.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use nippo_core::error::CoreError;

use crate::auth::csrf::verify_csrf_pair;
use crate::error::AppError;
use crate::middleware::cookies::{cookie_value, CSRF_COOKIE};
use crate::state::AppState;

/// Request header that must echo the raw CSRF token.
pub const CSRF_HEADER: &str = "x-csrf-token";

/// Rejects a request whose `x-csrf-token` header does not match the
/// signed `csrf_token` cookie.
///
/// Mutating handlers opt in by taking a `CsrfGuard` argument; the
/// extractor carries no data, running it is the whole check. Missing
/// header, missing cookie, and mismatch are all 403.
#[derive(Debug, Clone, Copy)]
pub struct CsrfGuard;

impl FromRequestParts<AppState> for CsrfGuard {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header_token = parts
            .headers
            .get(CSRF_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| forbidden("Missing CSRF token header"))?;

        let cookie_signature = cookie_value(&parts.headers, CSRF_COOKIE)
            .ok_or_else(|| forbidden("Missing CSRF cookie"))?;

        if !verify_csrf_pair(
            header_token,
            &cookie_signature,
            &state.config.auth.signing_key,
        ) {
            return Err(forbidden("CSRF token mismatch"));
        }

        Ok(Self)
    }
}

fn forbidden(msg: &str) -> AppError {
    AppError::Core(CoreError::Forbidden(msg.to_string()))
}
