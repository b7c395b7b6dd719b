//! Domain-level error taxonomy.
//!
//! Every fallible domain operation returns one of these variants. The API
//! layer maps them onto HTTP statuses (404, 400, 409, 401, 403, 500) without
//! inspecting message text.

use crate::types::DbId;

/// Domain error shared across the repository and API layers.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An entity id did not resolve to a row.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Input violated a domain rule. The message is user-facing.
    #[error("{0}")]
    Validation(String),

    /// The operation conflicts with existing state.
    #[error("{0}")]
    Conflict(String),

    /// Missing or invalid credentials.
    #[error("{0}")]
    Unauthorized(String),

    /// Authenticated, but not entitled to this action on this resource.
    #[error("{0}")]
    Forbidden(String),

    /// Unexpected internal failure. The message is logged, never shown.
    #[error("{0}")]
    Internal(String),
}
