//! Review gating and aggregate-rating rules.
//!
//! A review exists only for a completed booking, written once by that
//! booking's client, with an optional write-once provider response. The
//! provider aggregate is derived from the review set on every read -- there
//! is no stored average to drift out of sync.

use crate::booking::BookingStatus;
use crate::error::CoreError;
use crate::messages;
use crate::types::DbId;
use serde::Serialize;

/// Lowest accepted rating.
pub const MIN_RATING: i32 = 1;

/// Highest accepted rating.
pub const MAX_RATING: i32 = 5;

/// Default page size when listing a provider's reviews.
pub const DEFAULT_REVIEWS_LIMIT: i64 = 20;

/// Maximum page size when listing a provider's reviews.
pub const MAX_REVIEWS_LIMIT: i64 = 100;

/// Clamp a requested page size into `1..=MAX_REVIEWS_LIMIT`.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_REVIEWS_LIMIT).clamp(1, MAX_REVIEWS_LIMIT)
}

/// Clamp a requested offset to be non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// Validate that a rating lies in the inclusive 1..=5 range.
pub fn validate_rating(rating: i32) -> Result<(), CoreError> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(CoreError::Validation(messages::MSG_RATING_RANGE.into()))
    }
}

/// Gate for review creation: the caller must be the booking's client, and
/// the booking must have reached `completed`.
///
/// Checked in that order -- an unrelated caller learns they are not entitled
/// (403) before learning anything about the booking's progress.
pub fn authorize_review_creation(
    booking_client_id: DbId,
    booking_status: BookingStatus,
    caller_id: DbId,
) -> Result<(), CoreError> {
    if caller_id != booking_client_id {
        return Err(CoreError::Forbidden(
            messages::MSG_NOT_BOOKING_CLIENT.into(),
        ));
    }
    if booking_status != BookingStatus::Completed {
        return Err(CoreError::Validation(
            messages::MSG_BOOKING_NOT_COMPLETED.into(),
        ));
    }
    Ok(())
}

/// Gate for attaching a provider response: only the reviewed provider's
/// user may respond.
pub fn authorize_review_response(
    review_provider_user_id: DbId,
    caller_id: DbId,
) -> Result<(), CoreError> {
    if caller_id != review_provider_user_id {
        return Err(CoreError::Forbidden(
            messages::MSG_NOT_REVIEW_PROVIDER.into(),
        ));
    }
    Ok(())
}

/// Provider responses are write-once; a second attempt is rejected, never
/// overwritten.
pub fn ensure_response_slot_free(existing_response: Option<&str>) -> Result<(), CoreError> {
    if existing_response.is_some() {
        return Err(CoreError::Validation(
            messages::MSG_ALREADY_RESPONDED.into(),
        ));
    }
    Ok(())
}

/// Derived provider reputation: arithmetic mean plus count over the current
/// review set. Built from a running sum and count so the average is exact
/// (e.g. ratings 5 and 4 yield 4.5), never a stale cached float.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatingStats {
    pub average_rating: f64,
    pub total_reviews: i64,
}

impl RatingStats {
    /// The zero-review case: average 0, count 0 (not an error, not null).
    pub fn zero() -> RatingStats {
        RatingStats {
            average_rating: 0.0,
            total_reviews: 0,
        }
    }

    /// Build stats from the running sum and count of a provider's ratings.
    pub fn from_sum_count(rating_sum: i64, total_reviews: i64) -> RatingStats {
        if total_reviews == 0 {
            return RatingStats::zero();
        }
        RatingStats {
            average_rating: rating_sum as f64 / total_reviews as f64,
            total_reviews,
        }
    }
}
