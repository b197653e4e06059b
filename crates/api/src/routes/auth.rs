//! Route definitions for session and CSRF endpoints.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes merged at the root.
///
/// ```text
/// GET  /csrftoken             -> issue_csrf_token (public)
/// POST /token                 -> login            (public, form)
/// POST /token/account/{code}  -> login_account    (public, form)
/// POST /sign_out              -> sign_out         (requires session)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/csrftoken", get(auth::issue_csrf_token))
        .route("/token", post(auth::login))
        .route("/token/account/{code}", post(auth::login_account))
        .route("/sign_out", post(auth::sign_out))
}
