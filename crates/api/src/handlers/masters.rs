//! Master catalog endpoints.
//!
//! Every listing shares one response shape: `col_definitions` describes
//! the columns the frontend should render (label, input type, readonly,
//! optional selection list) and `col_values` carries the rows. The
//! name/cost catalogs are generic over [`MasterKind`]; the worksite and
//! trash-matrix listings have dedicated handlers because their rows are
//! shaped differently.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use nippo_core::error::CoreError;
use nippo_core::types::{Day, DbId};
use nippo_core::unit_type::{UnitType, ALL_UNITS};
use nippo_db::models::master::{CreateMaster, DeleteTarget, MasterKind, MasterRow, NameRef};
use nippo_db::models::report::ReportHead;
use nippo_db::models::trash::{CreateTrashMaster, TrashMasterRow};
use nippo_db::repositories::{MasterRepo, ReportRepo, TrashMasterRepo};
use nippo_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthSession;
use crate::middleware::csrf::CsrfGuard;
use crate::response::{Ack, Created};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Column metadata
// ---------------------------------------------------------------------------

/// One column description for the generic catalog table.
#[derive(Debug, Serialize)]
pub struct ColumnDef {
    pub label: &'static str,
    #[serde(rename = "type")]
    pub input: &'static str,
    pub readonly: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selections: Option<Vec<SelectOption>>,
}

impl ColumnDef {
    fn text(label: &'static str) -> Self {
        Self {
            label,
            input: "text",
            readonly: false,
            selections: None,
        }
    }

    fn number(label: &'static str) -> Self {
        Self {
            label,
            input: "number",
            readonly: false,
            selections: None,
        }
    }

    fn select(label: &'static str, selections: Vec<SelectOption>) -> Self {
        Self {
            label,
            input: "select",
            readonly: false,
            selections: Some(selections),
        }
    }

    fn readonly(label: &'static str, input: &'static str) -> Self {
        Self {
            label,
            input,
            readonly: true,
            selections: None,
        }
    }
}

/// One entry of a selection list.
#[derive(Debug, Serialize)]
pub struct SelectOption {
    pub id: i64,
    pub name: String,
}

impl From<NameRef> for SelectOption {
    fn from(r: NameRef) -> Self {
        Self {
            id: r.id,
            name: r.name,
        }
    }
}

/// The unit-type selection list, in display order.
pub(crate) fn unit_options() -> Vec<SelectOption> {
    ALL_UNITS
        .iter()
        .map(|unit| SelectOption {
            id: i64::from(unit.value()),
            name: unit.label().to_string(),
        })
        .collect()
}

/// Catalog listing response: column metadata plus rows.
#[derive(Debug, Serialize)]
pub struct CatalogResponse<C: Serialize, T: Serialize> {
    pub col_definitions: C,
    pub col_values: Vec<T>,
}

/// Columns of the simple name/cost/memo catalogs. `cost` is absent for
/// the name-only catalogs (dest, customer).
#[derive(Debug, Serialize)]
pub struct MasterColumns {
    pub name: ColumnDef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<ColumnDef>,
    pub memo: ColumnDef,
}

fn master_columns(kind: MasterKind) -> MasterColumns {
    MasterColumns {
        name: ColumnDef::text("Name"),
        cost: kind.has_cost().then(|| ColumnDef::number("Cost")),
        memo: ColumnDef::text("Memo"),
    }
}

/// Columns of the worksite listing. Rows are created through report
/// submission, so everything except the completion flag is readonly.
#[derive(Debug, Serialize)]
pub struct WorkColumns {
    pub worksite_name: ColumnDef,
    pub customer_name: ColumnDef,
    pub address: ColumnDef,
    pub memo: ColumnDef,
    pub complete: ColumnDef,
}

fn work_columns() -> WorkColumns {
    WorkColumns {
        worksite_name: ColumnDef::readonly("Worksite", "text"),
        customer_name: ColumnDef::readonly("Customer", "text"),
        address: ColumnDef::readonly("Address", "text"),
        memo: ColumnDef::readonly("Memo", "text"),
        complete: ColumnDef {
            label: "Completed",
            input: "checkbox",
            readonly: false,
            selections: None,
        },
    }
}

/// Columns of the trash cost matrix; destination and item are selected
/// from the account's catalogs.
#[derive(Debug, Serialize)]
pub struct TrashColumns {
    pub dest_id: ColumnDef,
    pub item_id: ColumnDef,
    pub cost: ColumnDef,
    pub unit_type: ColumnDef,
    pub memo: ColumnDef,
}

async fn trash_columns(pool: &DbPool, account_id: DbId) -> Result<TrashColumns, sqlx::Error> {
    let dests = MasterRepo::list_refs(pool, MasterKind::Dest, account_id).await?;
    let items = MasterRepo::list_refs(pool, MasterKind::Item, account_id).await?;

    Ok(TrashColumns {
        dest_id: ColumnDef::select("Destination", dests.into_iter().map(Into::into).collect()),
        item_id: ColumnDef::select("Item", items.into_iter().map(Into::into).collect()),
        cost: ColumnDef::number("Cost"),
        unit_type: ColumnDef::select("Unit", unit_options()),
        memo: ColumnDef::text("Memo"),
    })
}

// ---------------------------------------------------------------------------
// Name/cost catalogs: GET/POST/DELETE /master/{kind}
// ---------------------------------------------------------------------------

/// GET /master/{kind}
pub async fn list_catalog(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    session: AuthSession,
) -> AppResult<Json<CatalogResponse<MasterColumns, MasterRow>>> {
    let account_id = session.claims.require_account().map_err(AppError::Core)?;
    let kind: MasterKind = kind.parse().map_err(AppError::Core)?;

    let rows = MasterRepo::list(&state.pool, kind, account_id).await?;
    Ok(Json(CatalogResponse {
        col_definitions: master_columns(kind),
        col_values: rows,
    }))
}

/// POST /master/{kind}
///
/// A duplicate name within the account maps to 409 via the catalog's
/// unique constraint.
pub async fn create_master(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    session: AuthSession,
    _csrf: CsrfGuard,
    Json(req): Json<CreateMaster>,
) -> AppResult<(StatusCode, Json<Created>)> {
    let account_id = session.claims.require_account().map_err(AppError::Core)?;
    let kind: MasterKind = kind.parse().map_err(AppError::Core)?;

    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Name must not be empty".to_string(),
        )));
    }
    if req.cost.is_some_and(|cost| cost < 0) {
        return Err(AppError::Core(CoreError::Validation(
            "Cost must not be negative".to_string(),
        )));
    }

    let input = CreateMaster {
        name: name.to_string(),
        cost: req.cost,
        memo: req.memo,
    };
    let row = MasterRepo::create(&state.pool, kind, account_id, &input).await?;
    tracing::info!(account_id, kind = kind.entity(), id = row.id, "Master created");

    Ok((StatusCode::CREATED, Json(Created { new_id: row.id })))
}

/// DELETE /master/{kind}
///
/// The row id travels in the body. Historical report lines keep the
/// name they copied at submission time, so deletion never cascades.
pub async fn delete_master(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    session: AuthSession,
    _csrf: CsrfGuard,
    Json(req): Json<DeleteTarget>,
) -> AppResult<Json<Ack>> {
    let account_id = session.claims.require_account().map_err(AppError::Core)?;
    let kind: MasterKind = kind.parse().map_err(AppError::Core)?;

    let deleted = MasterRepo::delete(&state.pool, kind, account_id, req.id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::not_found(kind.entity(), req.id)));
    }
    tracing::info!(account_id, kind = kind.entity(), id = req.id, "Master deleted");

    Ok(Json(Ack::new("deleted")))
}

// ---------------------------------------------------------------------------
// Worksite listing: GET /master/work, POST /master/work/complete
// ---------------------------------------------------------------------------

/// One row of the worksite listing.
#[derive(Debug, Serialize)]
pub struct WorkRow {
    pub id: DbId,
    pub worksite_name: String,
    pub customer_name: String,
    pub address: String,
    pub memo: Option<String>,
    pub complete: bool,
    pub completed_date: Option<Day>,
}

impl From<ReportHead> for WorkRow {
    fn from(head: ReportHead) -> Self {
        Self {
            id: head.id,
            worksite_name: head.worksite_name,
            customer_name: head.customer_name,
            address: head.address,
            memo: head.memo,
            complete: head.completed_date.is_some(),
            completed_date: head.completed_date,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CompleteRequest {
    pub id: DbId,
    pub completed_date: Option<Day>,
}

/// GET /master/work
pub async fn list_work(
    State(state): State<AppState>,
    session: AuthSession,
) -> AppResult<Json<CatalogResponse<WorkColumns, WorkRow>>> {
    let account_id = session.claims.require_account().map_err(AppError::Core)?;

    let heads = ReportRepo::list_heads(&state.pool, account_id).await?;
    Ok(Json(CatalogResponse {
        col_definitions: work_columns(),
        col_values: heads.into_iter().map(WorkRow::from).collect(),
    }))
}

/// POST /master/work/complete
///
/// A date marks the worksite finished; `null` reopens it.
pub async fn set_work_complete(
    State(state): State<AppState>,
    session: AuthSession,
    _csrf: CsrfGuard,
    Json(req): Json<CompleteRequest>,
) -> AppResult<Json<Ack>> {
    let account_id = session.claims.require_account().map_err(AppError::Core)?;

    let updated =
        ReportRepo::set_completed(&state.pool, account_id, req.id, req.completed_date).await?;
    if !updated {
        return Err(AppError::Core(CoreError::not_found("Worksite", req.id)));
    }
    tracing::info!(
        account_id,
        head_id = req.id,
        completed = req.completed_date.is_some(),
        "Worksite completion updated"
    );

    Ok(Json(Ack::new("updated")))
}

// ---------------------------------------------------------------------------
// Trash cost matrix: GET/POST/DELETE /master/trash, point lookup
// ---------------------------------------------------------------------------

/// One trash matrix row with ids resolved to display names and the unit
/// tag resolved to its label.
#[derive(Debug, Serialize)]
pub struct TrashRowView {
    pub id: DbId,
    pub dest_id: DbId,
    pub item_id: DbId,
    pub dest_name: String,
    pub item_name: String,
    pub cost: i64,
    pub unit_type: i16,
    pub unit_name: &'static str,
    pub memo: Option<String>,
}

impl From<TrashMasterRow> for TrashRowView {
    fn from(row: TrashMasterRow) -> Self {
        Self {
            id: row.id,
            dest_id: row.dest_id,
            item_id: row.item_id,
            dest_name: row.dest_name,
            item_name: row.item_name,
            cost: row.cost,
            unit_name: UnitType::label_for(row.unit_type),
            unit_type: row.unit_type,
            memo: row.memo,
        }
    }
}

/// GET /master/trash
pub async fn list_trash(
    State(state): State<AppState>,
    session: AuthSession,
) -> AppResult<Json<CatalogResponse<TrashColumns, TrashRowView>>> {
    let account_id = session.claims.require_account().map_err(AppError::Core)?;

    let columns = trash_columns(&state.pool, account_id).await?;
    let rows = TrashMasterRepo::list(&state.pool, account_id).await?;

    Ok(Json(CatalogResponse {
        col_definitions: columns,
        col_values: rows.into_iter().map(TrashRowView::from).collect(),
    }))
}

/// POST /master/trash
///
/// Both referenced masters must belong to the session account; the
/// check runs before the insert so a foreign reference is a clean 400.
/// A duplicate (dest, item, unit) triple maps to 409.
pub async fn create_trash(
    State(state): State<AppState>,
    session: AuthSession,
    _csrf: CsrfGuard,
    Json(req): Json<CreateTrashMaster>,
) -> AppResult<(StatusCode, Json<Created>)> {
    let account_id = session.claims.require_account().map_err(AppError::Core)?;

    if req.cost < 0 {
        return Err(AppError::Core(CoreError::Validation(
            "Cost must not be negative".to_string(),
        )));
    }
    if UnitType::from_value(req.unit_type).is_none() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown unit type: {}",
            req.unit_type
        ))));
    }
    if !MasterRepo::exists(&state.pool, MasterKind::Dest, account_id, req.dest_id).await? {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown destination id: {}",
            req.dest_id
        ))));
    }
    if !MasterRepo::exists(&state.pool, MasterKind::Item, account_id, req.item_id).await? {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown item id: {}",
            req.item_id
        ))));
    }

    let row = TrashMasterRepo::create(&state.pool, account_id, &req).await?;
    tracing::info!(account_id, id = row.id, "Trash rate created");

    Ok((StatusCode::CREATED, Json(Created { new_id: row.id })))
}

/// DELETE /master/trash
pub async fn delete_trash(
    State(state): State<AppState>,
    session: AuthSession,
    _csrf: CsrfGuard,
    Json(req): Json<DeleteTarget>,
) -> AppResult<Json<Ack>> {
    let account_id = session.claims.require_account().map_err(AppError::Core)?;

    let deleted = TrashMasterRepo::delete(&state.pool, account_id, req.id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::not_found("TrashMaster", req.id)));
    }
    tracing::info!(account_id, id = req.id, "Trash rate deleted");

    Ok(Json(Ack::new("deleted")))
}

/// GET /master/trash/{dest_id}/{item_id}
///
/// Point lookup used by the report form when a trash line picks its
/// destination/item pair: 204 when the pair is unpriced, otherwise
/// `{cost, unit_type}` with the lowest unit tag winning.
pub async fn find_trash_rate(
    State(state): State<AppState>,
    Path((dest_id, item_id)): Path<(DbId, DbId)>,
    session: AuthSession,
) -> AppResult<Response> {
    let account_id = session.claims.require_account().map_err(AppError::Core)?;

    match TrashMasterRepo::find_rate(&state.pool, account_id, dest_id, item_id).await? {
        Some(rate) => Ok(Json(rate).into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}
