//! Repository for the `reviews` table.
//!
//! The one-review-per-booking invariant has two layers here: callers do a
//! fast-path [`ReviewRepo::find_by_booking_id`] check, and the
//! `uq_reviews_booking_id` unique constraint is the atomic backstop that
//! decides the race when two submissions pass the check simultaneously.

use oficios_core::review::{clamp_limit, clamp_offset};
use oficios_core::types::DbId;
use sqlx::PgPool;

use crate::models::review::{CreateReview, Review, ReviewWithClient};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, booking_id, client_id, provider_id, rating, comment, \
    provider_response, responded_at, created_at";

/// CRUD and aggregation operations for reviews.
pub struct ReviewRepo;

impl ReviewRepo {
    /// Insert a new review, returning the created row.
    ///
    /// A concurrent duplicate surfaces as a unique violation on
    /// `uq_reviews_booking_id`; the API layer translates it to the same
    /// user-facing error as the fast-path check.
    pub async fn create(pool: &PgPool, input: &CreateReview) -> Result<Review, sqlx::Error> {
        let query = format!(
            "INSERT INTO reviews (booking_id, client_id, provider_id, rating, comment)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(input.booking_id)
            .bind(input.client_id)
            .bind(input.provider_id)
            .bind(input.rating)
            .bind(&input.comment)
            .fetch_one(pool)
            .await
    }

    /// Find a review by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Review>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reviews WHERE id = $1");
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the review attached to a booking, if any.
    pub async fn find_by_booking_id(
        pool: &PgPool,
        booking_id: DbId,
    ) -> Result<Option<Review>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reviews WHERE booking_id = $1");
        sqlx::query_as::<_, Review>(&query)
            .bind(booking_id)
            .fetch_optional(pool)
            .await
    }

    /// List a provider's reviews (newest first) with the author's display
    /// identity joined in. `limit`/`offset` are clamped to sane bounds.
    pub async fn list_for_provider(
        pool: &PgPool,
        provider_id: DbId,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<ReviewWithClient>, sqlx::Error> {
        sqlx::query_as::<_, ReviewWithClient>(
            "SELECT r.id, r.booking_id, r.client_id, r.provider_id, r.rating,
                    r.comment, r.provider_response, r.responded_at, r.created_at,
                    u.display_name AS client_name, u.avatar_url AS client_avatar_url
             FROM reviews r
             JOIN users u ON u.id = r.client_id
             WHERE r.provider_id = $1
             ORDER BY r.created_at DESC, r.id DESC
             LIMIT $2 OFFSET $3",
        )
        .bind(provider_id)
        .bind(clamp_limit(limit))
        .bind(clamp_offset(offset))
        .fetch_all(pool)
        .await
    }

    /// Running sum and count of a provider's ratings, computed on read so
    /// the aggregate can never drift from the review set.
    pub async fn provider_rating_sum_count(
        pool: &PgPool,
        provider_id: DbId,
    ) -> Result<(i64, i64), sqlx::Error> {
        let row: (i64, i64) = sqlx::query_as(
            "SELECT COALESCE(SUM(rating), 0)::BIGINT, COUNT(*)
             FROM reviews
             WHERE provider_id = $1",
        )
        .bind(provider_id)
        .fetch_one(pool)
        .await?;
        Ok(row)
    }

    /// Attach the provider's response, write-once.
    ///
    /// Conditional on `provider_response IS NULL`, so a concurrent second
    /// response loses the race and gets `None` back.
    pub async fn set_response(
        pool: &PgPool,
        id: DbId,
        response: &str,
    ) -> Result<Option<Review>, sqlx::Error> {
        let query = format!(
            "UPDATE reviews
             SET provider_response = $2, responded_at = NOW()
             WHERE id = $1 AND provider_response IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .bind(response)
            .fetch_optional(pool)
            .await
    }
}
