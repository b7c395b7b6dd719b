//! Route definitions for reviews and provider reputation.
//!
//! ```text
//! POST   /                           reviews::create_review
//! GET    /provider/{provider_id}     reviews::get_provider_reviews   (public)
//! GET    /booking/{booking_id}       reviews::get_booking_review
//! PATCH  /{id}/response              reviews::respond_to_review
//! ```

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::review;
use crate::state::AppState;

/// Review routes, nested under `/reviews`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(review::create_review))
        .route("/provider/{provider_id}", get(review::get_provider_reviews))
        .route("/booking/{booking_id}", get(review::get_booking_review))
        .route("/{id}/response", patch(review::respond_to_review))
}
