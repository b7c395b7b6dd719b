//! Repository for the `users` table.

use oficios_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{User, UserSummary};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, display_name, email, avatar_url, role, created_at, updated_at";

/// Read operations for users. Account creation and mutation belong to the
/// identity collaborator, not this service.
pub struct UserRepo;

impl UserRepo {
    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch the display slice embedded in booking/review responses.
    pub async fn find_summary(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<UserSummary>, sqlx::Error> {
        sqlx::query_as::<_, UserSummary>(
            "SELECT id, display_name, avatar_url FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}
