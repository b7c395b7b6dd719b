//! Route definitions for the booking lifecycle.
//!
//! ```text
//! GET    /                bookings::list_bookings
//! POST   /                bookings::create_booking
//! GET    /{id}            bookings::get_booking
//! DELETE /{id}            bookings::delete_booking   (admin)
//! PATCH  /{id}/status     bookings::update_status
//! ```

use axum::routing::{delete, get, patch, post};
use axum::Router;

use crate::handlers::booking;
use crate::state::AppState;

/// Booking routes, nested under `/bookings`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(booking::list_bookings))
        .route("/", post(booking::create_booking))
        .route("/{id}", get(booking::get_booking))
        .route("/{id}", delete(booking::delete_booking))
        .route("/{id}/status", patch(booking::update_status))
}
