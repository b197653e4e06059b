//! Session endpoints: CSRF bootstrap, login, account login, sign-out.

use axum::extract::{Path, State};
use axum::http::header::SET_COOKIE;
use axum::response::{AppendHeaders, IntoResponse};
use axum::{Form, Json};
use serde::{Deserialize, Serialize};

use nippo_core::error::CoreError;
use nippo_db::models::user::User;
use nippo_db::repositories::{AccountRepo, UserRepo};

use crate::auth::csrf::{generate_csrf_token, sign_csrf_token};
use crate::auth::password::verify_password;
use crate::auth::token::generate_token;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthSession;
use crate::middleware::cookies::{auth_cookie, clear_auth_cookie, csrf_cookie};
use crate::middleware::csrf::CsrfGuard;
use crate::response::Ack;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request/response types
// ---------------------------------------------------------------------------

/// Credentials for both login variants, form-encoded.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Body returned by both login variants. `user_name` is the user's
/// display name, not the login name.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user_name: String,
    /// Present only for account-scoped logins.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,
}

/// Body returned by `GET /csrftoken`.
#[derive(Debug, Serialize)]
pub struct CsrfTokenResponse {
    pub csrf_token: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /csrftoken
///
/// Mints a CSRF token pair: the raw token goes in the body, its HMAC
/// signature in the `csrf_token` cookie. Mutating endpoints require both.
pub async fn issue_csrf_token(State(state): State<AppState>) -> impl IntoResponse {
    let token = generate_csrf_token();
    let signature = sign_csrf_token(&token, &state.config.auth.signing_key);

    (
        AppendHeaders([(SET_COOKIE, csrf_cookie(&signature))]),
        Json(CsrfTokenResponse { csrf_token: token }),
    )
}

/// POST /token
///
/// Plain login: verifies credentials and issues a session token with no
/// account scope. Tenant-scoped endpoints reject such a session with 403
/// until an account-scoped login replaces it.
pub async fn login(
    State(state): State<AppState>,
    _csrf: CsrfGuard,
    Form(form): Form<LoginForm>,
) -> AppResult<impl IntoResponse> {
    let user = check_credentials(&state, &form).await?;

    let token = issue_token(&state, user.id, None)?;
    tracing::info!(user_id = user.id, "Plain login");

    Ok((
        AppendHeaders([(SET_COOKIE, session_cookie(&state, &token))]),
        Json(LoginResponse {
            user_name: user.fullname,
            account_name: None,
        }),
    ))
}

/// POST /token/account/{code}
///
/// Account-scoped login: same credential check, then the account named
/// by `code` must exist and the user must be a member of it. Unknown
/// code and non-membership answer exactly like a bad password, so
/// neither usernames nor account codes can be probed.
pub async fn login_account(
    State(state): State<AppState>,
    Path(code): Path<String>,
    _csrf: CsrfGuard,
    Form(form): Form<LoginForm>,
) -> AppResult<impl IntoResponse> {
    // 1. Credentials first; the expensive hash check runs exactly once
    //    whether or not the account part fails afterwards.
    let user = check_credentials(&state, &form).await?;

    // 2. Resolve the account and check membership.
    let account = AccountRepo::find_by_code(&state.pool, &code)
        .await?
        .ok_or_else(bad_credentials)?;
    if !AccountRepo::is_member(&state.pool, account.id, user.id).await? {
        return Err(bad_credentials());
    }

    // 3. Scope the session to the account.
    let token = issue_token(&state, user.id, Some(account.id))?;
    tracing::info!(user_id = user.id, account_id = account.id, "Account login");

    Ok((
        AppendHeaders([(SET_COOKIE, session_cookie(&state, &token))]),
        Json(LoginResponse {
            user_name: user.fullname,
            account_name: Some(account.fullname),
        }),
    ))
}

/// POST /sign_out
///
/// Requires a valid session and expires the token cookie. The token
/// itself stays valid until `exp`; sign-out clears the browser copy.
pub async fn sign_out(_session: AuthSession, _csrf: CsrfGuard) -> impl IntoResponse {
    (
        AppendHeaders([(SET_COOKIE, clear_auth_cookie())]),
        Json(Ack::new("signed out")),
    )
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Look up the user and verify the password.
///
/// Unknown username and wrong password produce the same error.
async fn check_credentials(state: &AppState, form: &LoginForm) -> Result<User, AppError> {
    let user = UserRepo::find_by_username(&state.pool, &form.username)
        .await?
        .ok_or_else(bad_credentials)?;

    let valid = verify_password(&form.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))?;
    if !valid {
        return Err(bad_credentials());
    }

    Ok(user)
}

fn issue_token(
    state: &AppState,
    user_id: nippo_core::types::DbId,
    account_id: Option<nippo_core::types::DbId>,
) -> Result<String, AppError> {
    generate_token(user_id, account_id, &state.config.auth)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))
}

fn session_cookie(state: &AppState, token: &str) -> String {
    auth_cookie(token, state.config.auth.token_expiry_mins * 60)
}

fn bad_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Incorrect username or password".to_string(),
    ))
}
