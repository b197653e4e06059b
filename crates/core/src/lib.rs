//! Shared domain vocabulary for the nippo workspace.
//!
//! Holds the types every other crate agrees on: database id and timestamp
//! aliases, the domain error taxonomy, and the closed enumerations that
//! tag report line items and trash units.

pub mod error;
pub mod item_type;
pub mod types;
pub mod unit_type;
