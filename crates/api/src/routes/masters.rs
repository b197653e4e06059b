//! Route definitions for the `/master` resource.
//!
//! `work` and `trash` are fixed segments and take precedence over the
//! `{kind}` capture, which covers the seven name/cost catalogs.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::masters;
use crate::state::AppState;

/// Routes mounted at `/master`. All require an account-scoped session.
///
/// ```text
/// GET    /work                      -> list_work
/// POST   /work/complete             -> set_work_complete
/// GET    /trash                     -> list_trash
/// POST   /trash                     -> create_trash
/// DELETE /trash                     -> delete_trash
/// GET    /trash/{dest_id}/{item_id} -> find_trash_rate (204 if unpriced)
/// GET    /{kind}                    -> list_catalog
/// POST   /{kind}                    -> create_master
/// DELETE /{kind}                    -> delete_master
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/work", get(masters::list_work))
        .route("/work/complete", post(masters::set_work_complete))
        .route(
            "/trash",
            get(masters::list_trash)
                .post(masters::create_trash)
                .delete(masters::delete_trash),
        )
        .route("/trash/{dest_id}/{item_id}", get(masters::find_trash_rate))
        .route(
            "/{kind}",
            get(masters::list_catalog)
                .post(masters::create_master)
                .delete(masters::delete_master),
        )
}
