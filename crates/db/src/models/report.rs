//! Daily report entity models and DTOs.
//!
//! A [`ReportHead`] is one row per worksite and account; the per-day line
//! items live in `report_details`, keyed by head id and work date.

use serde::Serialize;
use sqlx::FromRow;

use nippo_core::item_type::ItemType;
use nippo_core::types::{Day, DbId, Timestamp};

/// Full report head row from the `report_heads` table.
#[derive(Debug, Clone, FromRow)]
pub struct ReportHead {
    pub id: DbId,
    pub account_id: DbId,
    /// Worksite name, unique per account. Doubles as the lookup key for
    /// report submission and retrieval.
    pub worksite_name: String,
    pub customer_name: String,
    pub address: String,
    pub memo: Option<String>,
    /// Set when the worksite is marked finished; `None` while it is open.
    pub completed_date: Option<Day>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Report head representation for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct ReportHeadResponse {
    pub id: DbId,
    pub worksite_name: String,
    pub customer_name: String,
    pub address: String,
    pub memo: Option<String>,
    pub completed_date: Option<Day>,
}

impl From<ReportHead> for ReportHeadResponse {
    fn from(head: ReportHead) -> Self {
        Self {
            id: head.id,
            worksite_name: head.worksite_name,
            customer_name: head.customer_name,
            address: head.address,
            memo: head.memo,
            completed_date: head.completed_date,
        }
    }
}

/// Head fields carried by every report submission. Applied on both insert
/// and resubmission, so the head always reflects the latest payload.
#[derive(Debug, Clone)]
pub struct ReportHeadFields {
    pub customer_name: String,
    pub address: String,
    pub memo: Option<String>,
}

/// Full detail row from the `report_details` table.
#[derive(Debug, Clone, FromRow)]
pub struct ReportDetail {
    pub id: DbId,
    pub report_head_id: DbId,
    pub work_date: Day,
    /// Stored [`ItemType`] tag. Kept as the raw i16 here; decoding happens
    /// where rows are grouped for output.
    pub item_type: i16,
    pub name: String,
    /// Destination display string, only populated for trash rows.
    pub dest: Option<String>,
    pub cost: i64,
    pub quant: i64,
    pub unit_type: i16,
    pub memo: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Detail row representation for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct ReportDetailResponse {
    pub id: DbId,
    pub work_date: Day,
    pub item_type: i16,
    pub name: String,
    pub dest: Option<String>,
    pub cost: i64,
    pub quant: i64,
    pub unit_type: i16,
    pub memo: Option<String>,
}

impl From<&ReportDetail> for ReportDetailResponse {
    fn from(row: &ReportDetail) -> Self {
        Self {
            id: row.id,
            work_date: row.work_date,
            item_type: row.item_type,
            name: row.name.clone(),
            dest: row.dest.clone(),
            cost: row.cost,
            quant: row.quant,
            unit_type: row.unit_type,
            memo: row.memo.clone(),
        }
    }
}

/// One line item ready for insertion into `report_details`.
///
/// Built from the submission payload after the per-type lists have been
/// flattened into submission order.
#[derive(Debug, Clone)]
pub struct NewReportDetail {
    pub item_type: ItemType,
    pub name: String,
    pub dest: Option<String>,
    pub cost: i64,
    pub quant: i64,
    pub unit_type: i16,
    pub memo: Option<String>,
}

/// One aggregated summary row: totals for a single item type on a single
/// work date.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SummaryRow {
    pub work_date: Day,
    pub item_type: i16,
    pub total_quant: i64,
    pub total_cost: i64,
}
