//! Route tree assembly.
//!
//! Route hierarchy under `/api/v1`:
//!
//! ```text
//! /bookings                          list (GET), create (POST)
//! /bookings/{id}                     detail (GET), delete (DELETE, admin)
//! /bookings/{id}/status              transition (PATCH)
//!
//! /reviews                           create (POST)
//! /reviews/provider/{provider_id}    public provider page (GET)
//! /reviews/booking/{booking_id}      review for a booking (GET)
//! /reviews/{id}/response             provider response (PATCH)
//! ```
//!
//! `GET /health` is mounted at the root level, outside `/api/v1`.

pub mod booking;
pub mod health;
pub mod review;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/bookings", booking::router())
        .nest("/reviews", review::router())
}
