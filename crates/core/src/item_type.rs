//! Item-type tag partitioning report detail lines.
//!
//! The discriminant values are fixed and stored in the
//! `report_details.item_type` SMALLINT column; changing them would
//! reinterpret existing rows.

use crate::error::CoreError;

/// Category of a report detail line.
#[repr(i16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemType {
    Other = 0,
    Staff = 1,
    Car = 2,
    Machine = 3,
    Lease = 4,
    Transport = 5,
    Trash = 6,
    Valuable = 7,
}

/// The order in which line items are flattened into detail rows on
/// submission. Detail rows read back in storage order group per type in
/// this sequence.
pub const SUBMISSION_ORDER: [ItemType; 8] = [
    ItemType::Staff,
    ItemType::Car,
    ItemType::Machine,
    ItemType::Lease,
    ItemType::Transport,
    ItemType::Trash,
    ItemType::Valuable,
    ItemType::Other,
];

impl ItemType {
    /// Return the stored SMALLINT value.
    pub fn value(self) -> i16 {
        self as i16
    }

    /// Resolve a stored value to its variant.
    pub fn from_value(value: i16) -> Option<Self> {
        match value {
            0 => Some(Self::Other),
            1 => Some(Self::Staff),
            2 => Some(Self::Car),
            3 => Some(Self::Machine),
            4 => Some(Self::Lease),
            5 => Some(Self::Transport),
            6 => Some(Self::Trash),
            7 => Some(Self::Valuable),
            _ => None,
        }
    }

    /// Resolve a stored value, treating an unknown tag as a data-integrity
    /// failure. Rows are only ever written through [`SUBMISSION_ORDER`],
    /// so an unknown value means the store was corrupted out-of-band.
    pub fn try_from_value(value: i16) -> Result<Self, CoreError> {
        Self::from_value(value)
            .ok_or_else(|| CoreError::Internal(format!("unknown item type tag: {value}")))
    }

    /// Symbolic name used as the grouping key in report responses.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Other => "OTHER",
            Self::Staff => "STAFF",
            Self::Car => "CAR",
            Self::Machine => "MACHINE",
            Self::Lease => "LEASE",
            Self::Transport => "TRANSPORT",
            Self::Trash => "TRASH",
            Self::Valuable => "VALUABLE",
        }
    }
}

impl From<ItemType> for i16 {
    fn from(value: ItemType) -> Self {
        value as i16
    }
}
