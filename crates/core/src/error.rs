use std::fmt::Display;

/// Domain-level error taxonomy shared across crates.
///
/// Handlers map these onto HTTP statuses; repositories and domain logic
/// raise them without knowing about HTTP.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced entity does not exist (safe no-op for the caller).
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    /// Input failed validation before any write happened.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A duplicate name/key within the same account scope.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Missing or invalid credentials/token.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated but not allowed (e.g. session lacks an account claim).
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Data-integrity or unexpected internal failure; never retried.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Builds a [`CoreError::NotFound`], stringifying whatever key the
    /// lookup used (a numeric id, a username, a worksite name).
    pub fn not_found(entity: &'static str, key: impl Display) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }
}
