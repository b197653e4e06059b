pub mod accounts;
pub mod auth;
pub mod health;
pub mod masters;
pub mod reports;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the application route tree, mounted at the root.
///
/// Route hierarchy:
///
/// ```text
/// GET    /csrftoken                        CSRF token + signature cookie (public)
/// POST   /token                            login (public, form)
/// POST   /token/account/{code}             account-scoped login (public, form)
/// POST   /sign_out                         clear session cookie
///
/// POST   /user                             signup (public)
/// GET    /user/{username}                  user profile
///
/// POST   /account/{code}                   create account
/// GET    /account/{account_id}/users       list members
/// POST   /account/{account_id}/users       add member
///
/// GET    /master/work                      worksite listing
/// POST   /master/work/complete             set / clear completion date
/// GET    /master/trash                     trash cost matrix
/// POST   /master/trash                     add matrix entry
/// DELETE /master/trash                     remove matrix entry
/// GET    /master/trash/{dest_id}/{item_id} point rate lookup (204 if unpriced)
/// GET    /master/{kind}                    catalog listing
/// POST   /master/{kind}                    add catalog row
/// DELETE /master/{kind}                    remove catalog row
///
/// GET    /daily_report/selections          picker reference lists
/// GET    /daily_report/{name}/{date}       one day of one worksite (204 unknown)
/// POST   /daily_report/{name}/{date}       submit / resubmit one day
///
/// GET    /summary/{work_id}                lifetime per-date totals
/// ```
///
/// Everything below `/master`, `/daily_report` and `/summary` requires a
/// session scoped to an account; plain sessions get 403 there.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Session, CSRF and sign-out live at the root.
        .merge(auth::router())
        // Signup and user lookup.
        .nest("/user", users::router())
        // Account creation and membership.
        .nest("/account", accounts::router())
        // Master catalogs, worksite listing, trash cost matrix.
        .nest("/master", masters::router())
        // Daily report submission and retrieval.
        .nest("/daily_report", reports::router())
        // Per-worksite summary.
        .merge(reports::summary_router())
}
