//! Handlers for the `/reviews` resource: gated creation, the public
//! provider page, per-booking lookup, and the write-once provider response.
//!
//! Creation preconditions run in a fixed order (auth, booking exists,
//! caller is its client, booking completed, rating in range, not yet
//! reviewed) so each failure mode surfaces as its own distinct error. The
//! explicit duplicate check is only the fast path -- the unique constraint
//! on `booking_id` decides concurrent races.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use oficios_core::error::CoreError;
use oficios_core::messages;
use oficios_core::review::{
    authorize_review_creation, authorize_review_response, ensure_response_slot_free,
    validate_rating, RatingStats,
};
use oficios_core::types::DbId;
use oficios_db::models::provider::ProviderSummary;
use oficios_db::models::review::{CreateReview, Review, ReviewWithClient};
use oficios_db::models::user::UserSummary;
use oficios_db::repositories::{BookingRepo, ProviderRepo, ReviewRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /reviews`.
#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub booking_id: DbId,
    pub rating: i32,
    pub comment: Option<String>,
}

/// Request body for `PATCH /reviews/{id}/response`.
#[derive(Debug, Deserialize)]
pub struct RespondToReviewRequest {
    pub response: String,
}

/// Payload of the public provider page: reviews plus derived stats.
#[derive(Debug, Serialize)]
pub struct ProviderReviewsResponse {
    pub reviews: Vec<ReviewWithClient>,
    pub stats: RatingStats,
}

/// A review with both parties' display identities embedded.
#[derive(Debug, Serialize)]
pub struct ReviewDetailResponse {
    #[serde(flatten)]
    pub review: Review,
    pub client: UserSummary,
    pub provider: ProviderSummary,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/reviews
///
/// Create the one review a completed booking admits. Only the booking's
/// client may submit it, exactly once.
pub async fn create_review(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateReviewRequest>,
) -> AppResult<impl IntoResponse> {
    let booking = BookingRepo::find_by_id(&state.pool, input.booking_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Booking",
                id: input.booking_id,
            })
        })?;

    authorize_review_creation(booking.client_id, booking.status()?, auth.user_id)?;
    validate_rating(input.rating)?;

    // Fast path; the unique constraint is the atomic backstop below.
    if ReviewRepo::find_by_booking_id(&state.pool, input.booking_id)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Validation(
            messages::MSG_ALREADY_REVIEWED.into(),
        )));
    }

    let create = CreateReview {
        booking_id: input.booking_id,
        client_id: auth.user_id,
        provider_id: booking.provider_id,
        rating: input.rating,
        comment: input.comment,
    };

    // A concurrent duplicate dies on `uq_reviews_booking_id` here and is
    // translated to the same "already reviewed" validation error.
    let review = ReviewRepo::create(&state.pool, &create).await?;

    tracing::info!(
        review_id = review.id,
        booking_id = review.booking_id,
        provider_id = review.provider_id,
        rating = review.rating,
        "Review created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: review })))
}

/// GET /api/v1/reviews/provider/{provider_id}
///
/// Public reputation data: the provider's reviews (author identity joined
/// in) and the derived rating stats. An unknown provider id yields an empty
/// list and zeroed stats, never an error.
pub async fn get_provider_reviews(
    State(state): State<AppState>,
    Path(provider_id): Path<DbId>,
    Query(pagination): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let reviews = ReviewRepo::list_for_provider(
        &state.pool,
        provider_id,
        pagination.limit,
        pagination.offset,
    )
    .await?;

    let (sum, count) = ReviewRepo::provider_rating_sum_count(&state.pool, provider_id).await?;
    let stats = RatingStats::from_sum_count(sum, count);

    Ok(Json(DataResponse {
        data: ProviderReviewsResponse { reviews, stats },
    }))
}

/// GET /api/v1/reviews/booking/{booking_id}
///
/// The review attached to a booking, with client and provider summaries.
/// 404 when the booking has not been reviewed.
pub async fn get_booking_review(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(booking_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let review = ReviewRepo::find_by_booking_id(&state.pool, booking_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Review",
                id: booking_id,
            })
        })?;

    let client = UserRepo::find_summary(&state.pool, review.client_id)
        .await?
        .ok_or_else(|| {
            AppError::InternalError(format!(
                "review {} references missing client {}",
                review.id, review.client_id
            ))
        })?;
    let provider = ProviderRepo::find_summary(&state.pool, review.provider_id)
        .await?
        .ok_or_else(|| {
            AppError::InternalError(format!(
                "review {} references missing provider {}",
                review.id, review.provider_id
            ))
        })?;

    Ok(Json(DataResponse {
        data: ReviewDetailResponse {
            review,
            client,
            provider,
        },
    }))
}

/// PATCH /api/v1/reviews/{id}/response
///
/// Attach the provider's response to a review. Write-once: a second
/// attempt is rejected, never overwritten.
pub async fn respond_to_review(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<RespondToReviewRequest>,
) -> AppResult<impl IntoResponse> {
    if input.response.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            messages::MSG_MISSING_REQUIRED_FIELDS.into(),
        )));
    }

    let review = ReviewRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Review", id }))?;

    let provider = ProviderRepo::find_by_id(&state.pool, review.provider_id)
        .await?
        .ok_or_else(|| {
            AppError::InternalError(format!(
                "review {} references missing provider {}",
                review.id, review.provider_id
            ))
        })?;

    authorize_review_response(provider.user_id, auth.user_id)?;
    ensure_response_slot_free(review.provider_response.as_deref())?;

    let updated = ReviewRepo::set_response(&state.pool, id, input.response.trim())
        .await?
        .ok_or_else(|| {
            // A concurrent response won the conditional update.
            AppError::Core(CoreError::Validation(
                messages::MSG_ALREADY_RESPONDED.into(),
            ))
        })?;

    tracing::info!(
        review_id = id,
        provider_user_id = auth.user_id,
        "Provider responded to review"
    );

    Ok(Json(DataResponse { data: updated }))
}
