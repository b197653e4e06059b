//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - `Serialize` response projections for API output
//! - `Deserialize` create DTOs for inserts

pub mod account;
pub mod master;
pub mod report;
pub mod trash;
pub mod user;
