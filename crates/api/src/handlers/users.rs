//! User signup and lookup.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use nippo_core::error::CoreError;
use nippo_db::models::user::{CreateUser, UserResponse};
use nippo_db::repositories::UserRepo;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthSession;
use crate::middleware::csrf::CsrfGuard;
use crate::response::Ack;
use crate::state::AppState;

/// Fullname used when signup provides no name parts.
const DEFAULT_FULLNAME: &str = "(no name)";

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    pub name_last: Option<String>,
    pub name_first: Option<String>,
}

impl SignupRequest {
    /// Join the optional name parts, falling back to a placeholder when
    /// both are empty or absent.
    fn fullname(&self) -> String {
        let parts: Vec<&str> = [self.name_last.as_deref(), self.name_first.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();

        if parts.is_empty() {
            DEFAULT_FULLNAME.to_string()
        } else {
            parts.join(" ")
        }
    }
}

/// POST /user
///
/// Open signup endpoint; usernames are globally unique and a duplicate
/// maps to 409 via `uq_users_username`.
pub async fn signup(
    State(state): State<AppState>,
    _csrf: CsrfGuard,
    Json(req): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<Ack>)> {
    // 1. Validate before hashing; hashing is the expensive step.
    let username = req.username.trim();
    if username.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Username must not be empty".to_string(),
        )));
    }
    validate_password_strength(&req.password, state.config.auth.min_password_length)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    // 2. Hash and insert; the unique constraint settles signup races.
    let password_hash = hash_password(&req.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;
    let input = CreateUser {
        username: username.to_string(),
        fullname: req.fullname(),
        password_hash,
    };
    let user = UserRepo::create(&state.pool, &input).await?;
    tracing::info!(user_id = user.id, "User signed up");

    Ok((StatusCode::CREATED, Json(Ack::new("succeeded"))))
}

/// GET /user/{username}
///
/// Profile lookup, session required so usernames cannot be probed
/// anonymously. [`UserResponse`] omits the password hash.
pub async fn get_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
    _session: AuthSession,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_username(&state.pool, &username)
        .await?
        .ok_or_else(|| CoreError::not_found("User", &username))?;

    Ok(Json(user.into()))
}
