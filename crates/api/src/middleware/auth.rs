//! Session extraction for protected endpoints.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use nippo_core::error::CoreError;

use crate::auth::token::{validate_token, Claims};
use crate::error::AppError;
use crate::middleware::cookies::{cookie_value, TOKEN_COOKIE};
use crate::state::AppState;

/// Extracts and validates the session token from a request.
///
/// The token is read from the `token` cookie first, then from an
/// `Authorization: Bearer` header, so browser sessions and non-browser
/// clients share the same endpoints. Handlers needing tenant scope call
/// [`Claims::require_account`] on the embedded claims.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub claims: Claims,
}

impl FromRequestParts<AppState> for AuthSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = cookie_value(&parts.headers, TOKEN_COOKIE)
            .or_else(|| {
                parts
                    .headers
                    .get(AUTHORIZATION)
                    .and_then(|value| value.to_str().ok())
                    .and_then(|value| value.strip_prefix("Bearer "))
                    .map(str::to_string)
            })
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Missing session token".to_string()))
            })?;

        let claims = validate_token(&token, &state.config.auth).map_err(AppError::Core)?;

        Ok(Self { claims })
    }
}
