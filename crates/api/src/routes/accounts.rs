//! Route definitions for the `/account` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::accounts;
use crate::state::AppState;

/// Routes mounted at `/account`.
///
/// ```text
/// POST /{code}              -> create_account (requires session)
/// GET  /{account_id}/users  -> list_members   (requires account scope)
/// POST /{account_id}/users  -> add_member     (requires account scope)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{code}", post(accounts::create_account))
        .route(
            "/{account_id}/users",
            get(accounts::list_members).post(accounts::add_member),
        )
}
