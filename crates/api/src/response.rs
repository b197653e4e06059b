//! Shared response types for API handlers.

use nippo_core::types::DbId;
use serde::Serialize;

/// Acknowledgement body for endpoints with no data to return.
///
/// The frontend keys on the status code; the `detail` string keeps the
/// body non-empty and greppable in request logs.
#[derive(Debug, Serialize)]
pub struct Ack {
    pub detail: &'static str,
}

impl Ack {
    pub const fn new(detail: &'static str) -> Self {
        Self { detail }
    }
}

/// Body returned by create endpoints: the assigned row id.
#[derive(Debug, Serialize)]
pub struct Created {
    pub new_id: DbId,
}
