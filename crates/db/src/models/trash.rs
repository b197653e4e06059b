//! Trash disposal cost matrix models and DTOs.
//!
//! Trash costs are keyed by (destination, item, unit) rather than by name:
//! each row prices one item at one disposal destination in one unit. The
//! destination and item are id references into the `dest_masters` and
//! `item_masters` catalogs; names are resolved at read time.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use nippo_core::types::{DbId, Timestamp};

/// Full trash cost row from the `trash_masters` table.
#[derive(Debug, Clone, FromRow)]
pub struct TrashMaster {
    pub id: DbId,
    pub account_id: DbId,
    pub dest_id: DbId,
    pub item_id: DbId,
    pub cost: i64,
    pub unit_type: i16,
    pub memo: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One trash cost row with destination and item names resolved, as listed
/// by the API.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TrashMasterRow {
    pub id: DbId,
    pub dest_id: DbId,
    pub item_id: DbId,
    pub dest_name: String,
    pub item_name: String,
    pub cost: i64,
    pub unit_type: i16,
    pub memo: Option<String>,
}

/// DTO for creating a trash cost entry.
#[derive(Debug, Deserialize)]
pub struct CreateTrashMaster {
    pub dest_id: DbId,
    pub item_id: DbId,
    pub cost: i64,
    pub unit_type: i16,
    pub memo: Option<String>,
}

/// Unit cost for one (destination, item) pair, returned by the point
/// lookup used when a report form needs a price.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TrashRate {
    pub cost: i64,
    pub unit_type: i16,
}
