//! HTTP request handlers.
//!
//! Handlers stay thin: extract, validate, call a repository, shape the
//! response. Request DTOs live next to the handlers that consume them;
//! entity response types come from `nippo_db::models`.

pub mod accounts;
pub mod auth;
pub mod masters;
pub mod reports;
pub mod users;
