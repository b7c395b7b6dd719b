//! Repository for the `providers` table.

use oficios_core::types::DbId;
use sqlx::PgPool;

use crate::models::provider::{Provider, ProviderSummary};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, headline, bio, created_at, updated_at";

/// Read operations for provider profiles. Profile CRUD is out of scope;
/// the lifecycle engine only needs existence checks and display summaries.
pub struct ProviderRepo;

impl ProviderRepo {
    /// Find a provider profile by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Provider>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM providers WHERE id = $1");
        sqlx::query_as::<_, Provider>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the profile owned by a given user, if any.
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Provider>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM providers WHERE user_id = $1");
        sqlx::query_as::<_, Provider>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch the display slice (profile + owning user) embedded in responses.
    pub async fn find_summary(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProviderSummary>, sqlx::Error> {
        sqlx::query_as::<_, ProviderSummary>(
            "SELECT p.id, p.user_id, u.display_name, u.avatar_url, p.headline
             FROM providers p
             JOIN users u ON u.id = p.user_id
             WHERE p.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}
