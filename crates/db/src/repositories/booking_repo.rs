//! Repository for the `bookings` table.
//!
//! Status transitions go through [`BookingRepo::transition`], a single
//! conditional UPDATE keyed on the expected current status. Two concurrent
//! transitions on the same booking cannot both succeed: the loser's WHERE
//! clause no longer matches and it gets `None` back.

use oficios_core::booking::BookingStatus;
use oficios_core::types::DbId;
use sqlx::PgPool;

use crate::models::booking::{Booking, CreateBooking};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, client_id, provider_id, service_date, description, address, \
    location, client_notes, problem_photo, status, accepted_at, confirmed_at, \
    started_at, completed_at, rejected_at, cancelled_at, cancellation_reason, \
    created_at, updated_at";

/// CRUD and lifecycle operations for bookings.
pub struct BookingRepo;

impl BookingRepo {
    /// Insert a new booking in the initial `pending` status.
    pub async fn create(pool: &PgPool, input: &CreateBooking) -> Result<Booking, sqlx::Error> {
        let query = format!(
            "INSERT INTO bookings
                (client_id, provider_id, service_date, description, address,
                 location, client_notes, problem_photo, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(input.client_id)
            .bind(input.provider_id)
            .bind(input.service_date)
            .bind(&input.description)
            .bind(&input.address)
            .bind(&input.location)
            .bind(&input.client_notes)
            .bind(&input.problem_photo)
            .bind(BookingStatus::Pending.as_str())
            .fetch_one(pool)
            .await
    }

    /// Find a booking by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings WHERE id = $1");
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a client's bookings in creation order.
    pub async fn list_for_client(
        pool: &PgPool,
        client_id: DbId,
    ) -> Result<Vec<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings WHERE client_id = $1 ORDER BY id ASC");
        sqlx::query_as::<_, Booking>(&query)
            .bind(client_id)
            .fetch_all(pool)
            .await
    }

    /// List a provider profile's bookings in creation order.
    pub async fn list_for_provider(
        pool: &PgPool,
        provider_id: DbId,
    ) -> Result<Vec<Booking>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM bookings WHERE provider_id = $1 ORDER BY id ASC");
        sqlx::query_as::<_, Booking>(&query)
            .bind(provider_id)
            .fetch_all(pool)
            .await
    }

    /// List every booking in creation order (admin view).
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings ORDER BY id ASC");
        sqlx::query_as::<_, Booking>(&query).fetch_all(pool).await
    }

    /// Atomically move a booking from `from` to `to`.
    ///
    /// The UPDATE is conditional on the current status still being `from`,
    /// stamps exactly the timestamp column matching `to` (write-once: the
    /// column is only ever touched by the transition that owns it), and
    /// records the cancellation reason when cancelling.
    ///
    /// Returns `None` when no row matched -- either the booking vanished or
    /// a concurrent request transitioned it first.
    pub async fn transition(
        pool: &PgPool,
        id: DbId,
        from: BookingStatus,
        to: BookingStatus,
        cancellation_reason: Option<&str>,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let mut set_clause = String::from("status = $1, updated_at = NOW()");
        if let Some(column) = to.timestamp_column() {
            set_clause.push_str(&format!(", {column} = NOW()"));
        }
        if to == BookingStatus::Cancelled {
            set_clause.push_str(", cancellation_reason = $4");
        }

        let query = format!(
            "UPDATE bookings SET {set_clause}
             WHERE id = $2 AND status = $3
             RETURNING {COLUMNS}"
        );

        let mut q = sqlx::query_as::<_, Booking>(&query)
            .bind(to.as_str())
            .bind(id)
            .bind(from.as_str());
        if to == BookingStatus::Cancelled {
            q = q.bind(cancellation_reason);
        }
        q.fetch_optional(pool).await
    }

    /// Hard-delete a booking (admin only). The `reviews.booking_id` FK
    /// cascades, removing any dependent review with it.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
