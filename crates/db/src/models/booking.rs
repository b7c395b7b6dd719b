//! Booking entity model and DTOs.

use oficios_core::booking::BookingStatus;
use oficios_core::error::CoreError;
use oficios_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full booking row from the `bookings` table.
///
/// `status` is stored as its wire name; use [`Booking::status`] to get the
/// closed enum before making any lifecycle decision.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Booking {
    pub id: DbId,
    pub client_id: DbId,
    /// References a provider profile, not a raw user id.
    pub provider_id: DbId,
    pub service_date: Timestamp,
    pub description: String,
    pub address: Option<String>,
    pub location: Option<String>,
    pub client_notes: Option<String>,
    /// Opaque reference to an uploaded photo of the problem.
    pub problem_photo: Option<String>,
    pub status: String,
    pub accepted_at: Option<Timestamp>,
    pub confirmed_at: Option<Timestamp>,
    pub started_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub rejected_at: Option<Timestamp>,
    pub cancelled_at: Option<Timestamp>,
    pub cancellation_reason: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Booking {
    /// Parse the stored status into the closed enum.
    ///
    /// A value outside the set means the row predates a schema CHECK or was
    /// tampered with; surface it as an internal error, not a validation one.
    pub fn status(&self) -> Result<BookingStatus, CoreError> {
        BookingStatus::parse(&self.status)
            .map_err(|_| CoreError::Internal(format!("corrupt booking status '{}'", self.status)))
    }
}

/// DTO for inserting a new booking. Status always starts at `pending`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBooking {
    pub client_id: DbId,
    pub provider_id: DbId,
    pub service_date: Timestamp,
    pub description: String,
    pub address: Option<String>,
    pub location: Option<String>,
    pub client_notes: Option<String>,
    pub problem_photo: Option<String>,
}
