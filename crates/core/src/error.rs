//! Domain-level error taxonomy shared by all crates.

use crate::types::DbId;

/// Errors produced by domain logic and the repository layer.
///
/// The API crate maps each variant onto an HTTP status code; everything
/// below the HTTP boundary speaks in these terms only.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced entity does not exist (or is soft-deleted).
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Input failed a domain validation rule.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The operation conflicts with current state (duplicate value,
    /// booking collision, ...).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Missing or invalid credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated, but not allowed.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Unexpected internal failure. The message is logged, not surfaced.
    #[error("Internal error: {0}")]
    Internal(String),
}
