//! Review entity model and DTOs.

use oficios_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full review row from the `reviews` table.
///
/// `booking_id` is unique (`uq_reviews_booking_id`): at most one review per
/// booking, enforced by the database as the final backstop under concurrent
/// submissions. `provider_id` is denormalized from the booking for fast
/// provider-page lookups.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Review {
    pub id: DbId,
    pub booking_id: DbId,
    pub client_id: DbId,
    pub provider_id: DbId,
    pub rating: i32,
    pub comment: Option<String>,
    pub provider_response: Option<String>,
    pub responded_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for inserting a new review.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReview {
    pub booking_id: DbId,
    pub client_id: DbId,
    pub provider_id: DbId,
    pub rating: i32,
    pub comment: Option<String>,
}

/// A review joined with its author's display identity, as listed on a
/// provider's public page.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReviewWithClient {
    pub id: DbId,
    pub booking_id: DbId,
    pub client_id: DbId,
    pub provider_id: DbId,
    pub rating: i32,
    pub comment: Option<String>,
    pub provider_response: Option<String>,
    pub responded_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub client_name: String,
    pub client_avatar_url: Option<String>,
}
