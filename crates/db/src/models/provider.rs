//! Provider profile model.
//!
//! Bookings reference provider profiles, not raw user ids; the profile is
//! the public face a client books against.

use oficios_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full provider profile row from the `providers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Provider {
    pub id: DbId,
    /// The user who owns this profile.
    pub user_id: DbId,
    pub headline: Option<String>,
    pub bio: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Provider identity embedded in booking and review responses
/// (profile joined with its owning user's display data).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProviderSummary {
    pub id: DbId,
    pub user_id: DbId,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub headline: Option<String>,
}
