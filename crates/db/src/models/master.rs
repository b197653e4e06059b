//! Cost master catalog models and DTOs.
//!
//! Seven catalog kinds share one row shape: the five costed catalogs
//! (staff, car, machine, lease, item) carry a unit cost, while the two
//! name-only catalogs (dest, customer) do not. [`MasterKind`] is the
//! closed set of kinds; every catalog query dispatches on it.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use nippo_core::error::CoreError;
use nippo_core::types::DbId;

/// The closed set of master catalogs.
///
/// URL segments and table names are derived from the variant, so an
/// unknown catalog name is rejected before any SQL is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MasterKind {
    Staff,
    Car,
    Machine,
    Lease,
    Item,
    Dest,
    Customer,
}

impl MasterKind {
    /// All catalog kinds, in fixed declaration order.
    pub const ALL: [MasterKind; 7] = [
        MasterKind::Staff,
        MasterKind::Car,
        MasterKind::Machine,
        MasterKind::Lease,
        MasterKind::Item,
        MasterKind::Dest,
        MasterKind::Customer,
    ];

    /// Parse a URL path segment into a catalog kind.
    pub fn parse(segment: &str) -> Option<MasterKind> {
        match segment {
            "staff" => Some(MasterKind::Staff),
            "car" => Some(MasterKind::Car),
            "machine" => Some(MasterKind::Machine),
            "lease" => Some(MasterKind::Lease),
            "item" => Some(MasterKind::Item),
            "dest" => Some(MasterKind::Dest),
            "customer" => Some(MasterKind::Customer),
            _ => None,
        }
    }

    /// Database table backing this catalog.
    pub fn table(self) -> &'static str {
        match self {
            MasterKind::Staff => "staff_masters",
            MasterKind::Car => "car_masters",
            MasterKind::Machine => "machine_masters",
            MasterKind::Lease => "lease_masters",
            MasterKind::Item => "item_masters",
            MasterKind::Dest => "dest_masters",
            MasterKind::Customer => "customer_masters",
        }
    }

    /// Entity name used in not-found errors.
    pub fn entity(self) -> &'static str {
        match self {
            MasterKind::Staff => "StaffMaster",
            MasterKind::Car => "CarMaster",
            MasterKind::Machine => "MachineMaster",
            MasterKind::Lease => "LeaseMaster",
            MasterKind::Item => "ItemMaster",
            MasterKind::Dest => "DestMaster",
            MasterKind::Customer => "CustomerMaster",
        }
    }

    /// Whether rows of this catalog carry a unit cost column.
    pub fn has_cost(self) -> bool {
        !matches!(self, MasterKind::Dest | MasterKind::Customer)
    }
}

impl FromStr for MasterKind {
    type Err = CoreError;

    fn from_str(segment: &str) -> Result<Self, Self::Err> {
        Self::parse(segment)
            .ok_or_else(|| CoreError::Validation(format!("Unknown master catalog: {segment}")))
    }
}

/// One catalog row as listed by the API.
///
/// `cost` is `None` for the name-only catalogs; the listing query selects
/// `NULL::BIGINT` there so all seven kinds share this shape.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MasterRow {
    pub id: DbId,
    pub name: String,
    pub cost: Option<i64>,
    pub memo: Option<String>,
}

/// Minimal id + name projection, used for selection lists.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct NameRef {
    pub id: DbId,
    pub name: String,
}

/// DTO for creating a catalog entry. `cost` is ignored for the name-only
/// catalogs and defaults to zero for the costed ones.
#[derive(Debug, Deserialize)]
pub struct CreateMaster {
    pub name: String,
    pub cost: Option<i64>,
    pub memo: Option<String>,
}

/// DTO naming the row to delete. Carried in the request body.
#[derive(Debug, Deserialize)]
pub struct DeleteTarget {
    pub id: DbId,
}
