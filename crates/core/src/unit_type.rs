//! Measurement unit for trash matrix entries and TRASH detail lines.

/// Unit attached to a trash cost (stored as SMALLINT).
#[repr(i16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitType {
    None = 0,
    Kg = 1,
    Ton = 2,
}

/// All units in display order, for selection lists.
pub const ALL_UNITS: [UnitType; 3] = [UnitType::None, UnitType::Kg, UnitType::Ton];

impl UnitType {
    /// Return the stored SMALLINT value.
    pub fn value(self) -> i16 {
        self as i16
    }

    /// Resolve a stored value to its variant.
    pub fn from_value(value: i16) -> Option<Self> {
        match value {
            0 => Some(Self::None),
            1 => Some(Self::Kg),
            2 => Some(Self::Ton),
            _ => None,
        }
    }

    /// Display label shown in listings and selection lists.
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "-",
            Self::Kg => "Kg",
            Self::Ton => "t",
        }
    }

    /// Label for a stored value, falling back to the unitless label for
    /// values outside the known set (legacy rows are displayed, not
    /// rejected).
    pub fn label_for(value: i16) -> &'static str {
        Self::from_value(value).unwrap_or(Self::None).label()
    }
}

impl From<UnitType> for i16 {
    fn from(value: UnitType) -> Self {
        value as i16
    }
}
