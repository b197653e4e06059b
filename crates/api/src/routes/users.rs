//! Route definitions for the `/user` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/user`.
///
/// ```text
/// POST /             -> signup   (public)
/// GET  /{username}   -> get_user (requires session)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(users::signup))
        .route("/{username}", get(users::get_user))
}
