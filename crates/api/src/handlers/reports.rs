//! Daily report endpoints.
//!
//! A submission carries the head fields plus one list of line items per
//! category. The lists are flattened into detail rows in submission
//! order and handed to the repository, which replaces the day
//! atomically. Reading a day groups the stored rows back per category.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use nippo_core::error::CoreError;
use nippo_core::item_type::{ItemType, SUBMISSION_ORDER};
use nippo_core::types::{Day, DbId};
use nippo_core::unit_type::UnitType;
use nippo_db::models::master::{MasterKind, NameRef};
use nippo_db::models::report::{
    NewReportDetail, ReportDetailResponse, ReportHeadFields, ReportHeadResponse,
};
use nippo_db::repositories::{MasterRepo, ReportRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::masters::{unit_options, SelectOption};
use crate::middleware::auth::AuthSession;
use crate::middleware::csrf::CsrfGuard;
use crate::response::Created;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Submission payload
// ---------------------------------------------------------------------------

/// One line item of a non-trash category. Cost defaults to 0, quantity
/// to 1, so a bare `{"name": "..."}` entry is a valid line.
#[derive(Debug, Deserialize)]
pub struct LineItem {
    pub name: String,
    #[serde(default)]
    pub cost: i64,
    #[serde(default = "default_quant")]
    pub quant: i64,
    pub memo: Option<String>,
}

/// One trash line. The item name travels as `item` and the destination
/// as `dest`; both are copied into the detail row as plain strings.
#[derive(Debug, Deserialize)]
pub struct TrashLine {
    pub item: String,
    pub dest: Option<String>,
    #[serde(default)]
    pub cost: i64,
    #[serde(default = "default_quant")]
    pub quant: i64,
    #[serde(default)]
    pub unit_type: i16,
    pub memo: Option<String>,
}

fn default_quant() -> i64 {
    1
}

/// Per-category line lists of one submission. Every list defaults to
/// empty, so partial payloads submit only the categories they carry.
#[derive(Debug, Default, Deserialize)]
pub struct DetailPayload {
    #[serde(default)]
    pub staffs: Vec<LineItem>,
    #[serde(default)]
    pub cars: Vec<LineItem>,
    #[serde(default)]
    pub machines: Vec<LineItem>,
    #[serde(default)]
    pub leases: Vec<LineItem>,
    #[serde(default)]
    pub transports: Vec<LineItem>,
    #[serde(default)]
    pub trashes: Vec<TrashLine>,
    #[serde(default)]
    pub valuables: Vec<LineItem>,
    #[serde(default)]
    pub others: Vec<LineItem>,
}

impl DetailPayload {
    /// Flatten the per-category lists into detail rows, walking
    /// [`SUBMISSION_ORDER`] so storage order groups per category.
    fn into_rows(mut self) -> Vec<NewReportDetail> {
        let mut rows = Vec::new();
        for item_type in SUBMISSION_ORDER {
            let lines = match item_type {
                ItemType::Staff => std::mem::take(&mut self.staffs),
                ItemType::Car => std::mem::take(&mut self.cars),
                ItemType::Machine => std::mem::take(&mut self.machines),
                ItemType::Lease => std::mem::take(&mut self.leases),
                ItemType::Transport => std::mem::take(&mut self.transports),
                ItemType::Valuable => std::mem::take(&mut self.valuables),
                ItemType::Other => std::mem::take(&mut self.others),
                ItemType::Trash => {
                    for line in std::mem::take(&mut self.trashes) {
                        rows.push(NewReportDetail {
                            item_type: ItemType::Trash,
                            name: line.item,
                            dest: line.dest,
                            cost: line.cost,
                            quant: line.quant,
                            unit_type: line.unit_type,
                            memo: line.memo,
                        });
                    }
                    continue;
                }
            };
            for line in lines {
                rows.push(NewReportDetail {
                    item_type,
                    name: line.name,
                    dest: None,
                    cost: line.cost,
                    quant: line.quant,
                    unit_type: UnitType::None.value(),
                    memo: line.memo,
                });
            }
        }
        rows
    }
}

/// Head fields of one submission. The worksite name comes from the URL;
/// everything here overwrites the stored head on every submission.
#[derive(Debug, Default, Deserialize)]
pub struct HeadPayload {
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub address: String,
    pub memo: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReportSubmission {
    #[serde(default)]
    pub head: HeadPayload,
    #[serde(default)]
    pub detail: DetailPayload,
}

fn validate_rows(rows: &[NewReportDetail]) -> Result<(), CoreError> {
    for row in rows {
        if row.cost < 0 {
            return Err(CoreError::Validation(format!(
                "Negative cost on {} line \"{}\"",
                row.item_type.as_str(),
                row.name
            )));
        }
        if row.quant < 0 {
            return Err(CoreError::Validation(format!(
                "Negative quantity on {} line \"{}\"",
                row.item_type.as_str(),
                row.name
            )));
        }
        if UnitType::from_value(row.unit_type).is_none() {
            return Err(CoreError::Validation(format!(
                "Unknown unit type: {}",
                row.unit_type
            )));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Grouped day response
// ---------------------------------------------------------------------------

/// Detail rows of one day grouped per category. Categories with no rows
/// are omitted from the JSON.
#[derive(Debug, Default, Serialize)]
pub struct GroupedDetails {
    #[serde(rename = "STAFF", skip_serializing_if = "Option::is_none")]
    pub staffs: Option<Vec<ReportDetailResponse>>,
    #[serde(rename = "CAR", skip_serializing_if = "Option::is_none")]
    pub cars: Option<Vec<ReportDetailResponse>>,
    #[serde(rename = "MACHINE", skip_serializing_if = "Option::is_none")]
    pub machines: Option<Vec<ReportDetailResponse>>,
    #[serde(rename = "LEASE", skip_serializing_if = "Option::is_none")]
    pub leases: Option<Vec<ReportDetailResponse>>,
    #[serde(rename = "TRANSPORT", skip_serializing_if = "Option::is_none")]
    pub transports: Option<Vec<ReportDetailResponse>>,
    #[serde(rename = "TRASH", skip_serializing_if = "Option::is_none")]
    pub trashes: Option<Vec<ReportDetailResponse>>,
    #[serde(rename = "VALUABLE", skip_serializing_if = "Option::is_none")]
    pub valuables: Option<Vec<ReportDetailResponse>>,
    #[serde(rename = "OTHER", skip_serializing_if = "Option::is_none")]
    pub others: Option<Vec<ReportDetailResponse>>,
}

impl GroupedDetails {
    fn group_mut(&mut self, item_type: ItemType) -> &mut Vec<ReportDetailResponse> {
        let slot = match item_type {
            ItemType::Staff => &mut self.staffs,
            ItemType::Car => &mut self.cars,
            ItemType::Machine => &mut self.machines,
            ItemType::Lease => &mut self.leases,
            ItemType::Transport => &mut self.transports,
            ItemType::Trash => &mut self.trashes,
            ItemType::Valuable => &mut self.valuables,
            ItemType::Other => &mut self.others,
        };
        slot.get_or_insert_with(Vec::new)
    }
}

#[derive(Debug, Serialize)]
pub struct DailyReportResponse {
    pub head: ReportHeadResponse,
    pub detail: GroupedDetails,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /daily_report/{work_name}/{work_date}
///
/// Creates the worksite head on first submission and replaces the
/// day's detail rows on every submission after it. Returns the head id
/// either way.
pub async fn submit_daily_report(
    State(state): State<AppState>,
    Path((work_name, work_date)): Path<(String, Day)>,
    session: AuthSession,
    _csrf: CsrfGuard,
    Json(submission): Json<ReportSubmission>,
) -> AppResult<Json<Created>> {
    let account_id = session.claims.require_account().map_err(AppError::Core)?;

    // 1. Validate the worksite key and flatten the payload.
    let worksite_name = work_name.trim();
    if worksite_name.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Worksite name must not be empty".to_string(),
        )));
    }
    let head = ReportHeadFields {
        customer_name: submission.head.customer_name,
        address: submission.head.address,
        memo: submission.head.memo,
    };
    let rows = submission.detail.into_rows();
    validate_rows(&rows).map_err(AppError::Core)?;

    // 2. Upsert head and replace the day in one transaction.
    let head_id = ReportRepo::replace_day(
        &state.pool,
        account_id,
        worksite_name,
        work_date,
        &head,
        &rows,
    )
    .await?;

    tracing::info!(
        account_id,
        head_id,
        worksite = worksite_name,
        date = %work_date,
        rows = rows.len(),
        "Daily report stored"
    );

    Ok(Json(Created { new_id: head_id }))
}

/// GET /daily_report/{work_name}/{work_date}
///
/// 204 when the worksite has never been submitted; an existing worksite
/// with no rows on the date returns its head and an empty detail map.
pub async fn get_daily_report(
    State(state): State<AppState>,
    Path((work_name, work_date)): Path<(String, Day)>,
    session: AuthSession,
) -> AppResult<Response> {
    let account_id = session.claims.require_account().map_err(AppError::Core)?;

    let Some(head) = ReportRepo::find_head(&state.pool, account_id, &work_name).await? else {
        return Ok(StatusCode::NO_CONTENT.into_response());
    };

    let details = ReportRepo::day_details(&state.pool, head.id, work_date).await?;
    let mut grouped = GroupedDetails::default();
    for row in &details {
        let item_type = ItemType::try_from_value(row.item_type).map_err(AppError::Core)?;
        grouped.group_mut(item_type).push(ReportDetailResponse::from(row));
    }

    let body = DailyReportResponse {
        head: ReportHeadResponse::from(head),
        detail: grouped,
    };
    Ok(Json(body).into_response())
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// One summary line: totals for one category on one work date.
#[derive(Debug, Serialize)]
pub struct SummaryRowView {
    pub work_date: Day,
    pub item_type: &'static str,
    pub total_quant: i64,
    pub total_cost: i64,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub head: ReportHeadResponse,
    pub rows: Vec<SummaryRowView>,
}

/// GET /summary/{work_id}
///
/// Per-date, per-category totals across the whole lifetime of one
/// worksite, ordered by date then category tag.
pub async fn get_summary(
    State(state): State<AppState>,
    Path(work_id): Path<DbId>,
    session: AuthSession,
) -> AppResult<Json<SummaryResponse>> {
    let account_id = session.claims.require_account().map_err(AppError::Core)?;

    let head = ReportRepo::find_head_by_id(&state.pool, account_id, work_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Worksite", work_id)))?;

    let mut rows = Vec::new();
    for row in ReportRepo::summarize(&state.pool, head.id).await? {
        let item_type = ItemType::try_from_value(row.item_type).map_err(AppError::Core)?;
        rows.push(SummaryRowView {
            work_date: row.work_date,
            item_type: item_type.as_str(),
            total_quant: row.total_quant,
            total_cost: row.total_cost,
        });
    }

    Ok(Json(SummaryResponse {
        head: ReportHeadResponse::from(head),
        rows,
    }))
}

// ---------------------------------------------------------------------------
// Selections
// ---------------------------------------------------------------------------

/// Reference lists the report form needs to fill its pickers.
#[derive(Debug, Serialize)]
pub struct SelectionsResponse {
    pub staffs: Vec<NameRef>,
    pub cars: Vec<NameRef>,
    pub machines: Vec<NameRef>,
    pub leases: Vec<NameRef>,
    pub dests: Vec<NameRef>,
    pub items: Vec<NameRef>,
    pub customers: Vec<String>,
    /// Open worksites only; completed ones no longer accept reports.
    pub worksites: Vec<String>,
    pub unit_types: Vec<SelectOption>,
}

/// GET /daily_report/selections
pub async fn get_selections(
    State(state): State<AppState>,
    session: AuthSession,
) -> AppResult<Json<SelectionsResponse>> {
    let account_id = session.claims.require_account().map_err(AppError::Core)?;
    let pool = &state.pool;

    let customers = MasterRepo::list_refs(pool, MasterKind::Customer, account_id)
        .await?
        .into_iter()
        .map(|r| r.name)
        .collect();

    Ok(Json(SelectionsResponse {
        staffs: MasterRepo::list_refs(pool, MasterKind::Staff, account_id).await?,
        cars: MasterRepo::list_refs(pool, MasterKind::Car, account_id).await?,
        machines: MasterRepo::list_refs(pool, MasterKind::Machine, account_id).await?,
        leases: MasterRepo::list_refs(pool, MasterKind::Lease, account_id).await?,
        dests: MasterRepo::list_refs(pool, MasterKind::Dest, account_id).await?,
        items: MasterRepo::list_refs(pool, MasterKind::Item, account_id).await?,
        customers,
        worksites: ReportRepo::open_worksite_names(pool, account_id).await?,
        unit_types: unit_options(),
    }))
}
