//! User entity model.
//!
//! Users are owned by the identity collaborator; this table is the local
//! mirror carrying what the marketplace needs -- role, display name, avatar.

use oficios_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full user row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub display_name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    /// Role wire name (`client`, `provider`, `admin`).
    pub role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The slice of user identity embedded in booking and review responses.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserSummary {
    pub id: DbId,
    pub display_name: String,
    pub avatar_url: Option<String>,
}
