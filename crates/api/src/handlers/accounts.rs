//! Account creation and membership management.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use nippo_core::error::CoreError;
use nippo_core::types::DbId;
use nippo_db::models::account::{AccountResponse, CreateAccount};
use nippo_db::models::user::UserResponse;
use nippo_db::repositories::{AccountRepo, UserRepo};

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthSession;
use crate::middleware::csrf::CsrfGuard;
use crate::response::Ack;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    pub fullname: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct AddMemberRequest {
    pub user_id: DbId,
}

/// POST /account/{code}
///
/// Creates an account with the caller as its first member (one
/// transaction). Any authenticated session may create accounts; the
/// session does not need account scope yet.
pub async fn create_account(
    State(state): State<AppState>,
    Path(code): Path<String>,
    session: AuthSession,
    _csrf: CsrfGuard,
    Json(req): Json<CreateAccountRequest>,
) -> AppResult<(StatusCode, Json<AccountResponse>)> {
    let code = code.trim();
    if code.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Account code must not be empty".to_string(),
        )));
    }
    if req.fullname.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Account name must not be empty".to_string(),
        )));
    }

    let password_hash = hash_password(&req.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;
    let input = CreateAccount {
        code: code.to_string(),
        fullname: req.fullname.trim().to_string(),
        password_hash,
    };

    let account = AccountRepo::create(&state.pool, &input, session.claims.sub).await?;
    tracing::info!(
        account_id = account.id,
        user_id = session.claims.sub,
        "Account created"
    );

    Ok((StatusCode::CREATED, Json(account.into())))
}

/// POST /account/{account_id}/users
///
/// Adds a user to the account. The caller's session must be scoped to
/// the same account; an existing membership is reported as 409.
pub async fn add_member(
    State(state): State<AppState>,
    Path(account_id): Path<DbId>,
    session: AuthSession,
    _csrf: CsrfGuard,
    Json(req): Json<AddMemberRequest>,
) -> AppResult<(StatusCode, Json<Ack>)> {
    require_scope(&session, account_id)?;

    // Resolve the user first so an unknown id is a 404, not a
    // foreign-key failure.
    let user = UserRepo::find_by_id(&state.pool, req.user_id)
        .await?
        .ok_or_else(|| CoreError::not_found("User", req.user_id))?;

    let added = AccountRepo::add_member(&state.pool, account_id, user.id).await?;
    if !added {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "User {} is already a member",
            user.username
        ))));
    }
    tracing::info!(account_id, user_id = user.id, "Member added");

    Ok((StatusCode::CREATED, Json(Ack::new("succeeded"))))
}

/// GET /account/{account_id}/users
///
/// Lists the account's members, without password hashes.
pub async fn list_members(
    State(state): State<AppState>,
    Path(account_id): Path<DbId>,
    session: AuthSession,
) -> AppResult<Json<Vec<UserResponse>>> {
    require_scope(&session, account_id)?;

    let members = AccountRepo::list_members(&state.pool, account_id).await?;
    Ok(Json(members.into_iter().map(UserResponse::from).collect()))
}

/// Rejects sessions not scoped to the account named in the path.
fn require_scope(session: &AuthSession, account_id: DbId) -> Result<(), AppError> {
    let scoped = session.claims.require_account()?;
    if scoped != account_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Session is scoped to a different account".to_string(),
        )));
    }
    Ok(())
}
