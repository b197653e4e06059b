//! Route definitions for daily reports and the per-worksite summary.

use axum::routing::get;
use axum::Router;

use crate::handlers::reports;
use crate::state::AppState;

/// Routes mounted at `/daily_report`. All require an account-scoped
/// session.
///
/// ```text
/// GET  /selections               -> get_selections
/// GET  /{work_name}/{work_date}  -> get_daily_report (204 for unknown worksite)
/// POST /{work_name}/{work_date}  -> submit_daily_report
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/selections", get(reports::get_selections))
        .route(
            "/{work_name}/{work_date}",
            get(reports::get_daily_report).post(reports::submit_daily_report),
        )
}

/// Routes merged at the root.
///
/// ```text
/// GET /summary/{work_id}  -> get_summary
/// ```
pub fn summary_router() -> Router<AppState> {
    Router::new().route("/summary/{work_id}", get(reports::get_summary))
}
