//! Handlers for the `/bookings` resource: creation, listing, detail,
//! lifecycle transitions, and admin deletion.
//!
//! The transition endpoint is intentionally thin: it resolves the caller's
//! party and the current status, asks `oficios_core` whether the edge is
//! legal for that party, and applies the change through the repository's
//! conditional update so concurrent requests cannot double-apply.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use oficios_core::booking::{
    authorize_transition, extract_urgency, party_of, validate_new_booking, BookingStatus, Party,
};
use oficios_core::error::CoreError;
use oficios_core::messages;
use oficios_core::roles::Role;
use oficios_core::types::{DbId, Timestamp};
use oficios_db::models::booking::{Booking, CreateBooking};
use oficios_db::models::provider::ProviderSummary;
use oficios_db::models::user::UserSummary;
use oficios_db::repositories::{BookingRepo, ProviderRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /bookings`.
#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub provider_id: DbId,
    pub service_date: Timestamp,
    pub description: String,
    pub address: Option<String>,
    pub location: Option<String>,
    pub client_notes: Option<String>,
    pub problem_photo: Option<String>,
}

/// Request body for `PATCH /bookings/{id}/status`.
///
/// `status` arrives as a wire string and is parsed into the closed enum
/// before any decision is made, so unknown values produce the domain's own
/// validation error rather than a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
    pub cancellation_reason: Option<String>,
}

/// A booking plus the urgency level parsed from the client's notes.
#[derive(Debug, Serialize)]
pub struct BookingResponse {
    #[serde(flatten)]
    pub booking: Booking,
    pub urgency: Option<String>,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        let urgency = extract_urgency(booking.client_notes.as_deref());
        BookingResponse { booking, urgency }
    }
}

/// Booking detail with both parties' display identities embedded.
#[derive(Debug, Serialize)]
pub struct BookingDetailResponse {
    #[serde(flatten)]
    pub booking: BookingResponse,
    pub client: UserSummary,
    pub provider: ProviderSummary,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch a booking or fail with 404.
async fn fetch_booking(state: &AppState, id: DbId) -> AppResult<Booking> {
    BookingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Booking",
                id,
            })
        })
}

/// Resolve the user who owns a booking's provider profile.
///
/// The FK guarantees the profile exists; a miss here is data corruption,
/// not caller error.
async fn provider_user_id(state: &AppState, booking: &Booking) -> AppResult<DbId> {
    let provider = ProviderRepo::find_by_id(&state.pool, booking.provider_id)
        .await?
        .ok_or_else(|| {
            AppError::InternalError(format!(
                "booking {} references missing provider {}",
                booking.id, booking.provider_id
            ))
        })?;
    Ok(provider.user_id)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/bookings
///
/// Create a booking in the initial `pending` status. Client principals only;
/// input is validated before the provider lookup so no row is written for
/// malformed requests.
pub async fn create_booking(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateBookingRequest>,
) -> AppResult<impl IntoResponse> {
    if auth.role != Role::Client {
        return Err(AppError::Core(CoreError::Forbidden(
            messages::MSG_ONLY_CLIENTS_BOOK.into(),
        )));
    }

    validate_new_booking(&input.description, input.service_date, Utc::now())?;

    ProviderRepo::find_by_id(&state.pool, input.provider_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Provider",
                id: input.provider_id,
            })
        })?;

    let create = CreateBooking {
        client_id: auth.user_id,
        provider_id: input.provider_id,
        service_date: input.service_date,
        description: input.description,
        address: input.address,
        location: input.location,
        client_notes: input.client_notes,
        problem_photo: input.problem_photo,
    };

    let booking = BookingRepo::create(&state.pool, &create).await?;

    tracing::info!(
        booking_id = booking.id,
        client_id = auth.user_id,
        provider_id = booking.provider_id,
        "Booking created"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: BookingResponse::from(booking),
        }),
    ))
}

/// GET /api/v1/bookings
///
/// List the caller's own bookings in creation order. Clients see the
/// bookings they created, providers the ones addressed to their profile,
/// admins everything.
pub async fn list_bookings(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let bookings = match auth.role {
        Role::Client => BookingRepo::list_for_client(&state.pool, auth.user_id).await?,
        Role::Provider => match ProviderRepo::find_by_user_id(&state.pool, auth.user_id).await? {
            Some(provider) => BookingRepo::list_for_provider(&state.pool, provider.id).await?,
            None => Vec::new(),
        },
        Role::Admin => BookingRepo::list_all(&state.pool).await?,
    };

    let data: Vec<BookingResponse> = bookings.into_iter().map(BookingResponse::from).collect();
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/bookings/{id}
///
/// Booking detail with client and provider summaries. Only the booking's
/// parties (or an admin) may read it.
pub async fn get_booking(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let booking = fetch_booking(&state, id).await?;
    let owner_id = provider_user_id(&state, &booking).await?;

    let party = party_of(booking.client_id, owner_id, auth.user_id, auth.role);
    if party == Party::Stranger {
        return Err(AppError::Core(CoreError::Forbidden(
            messages::MSG_NOT_BOOKING_PARTY.into(),
        )));
    }

    let client = UserRepo::find_summary(&state.pool, booking.client_id)
        .await?
        .ok_or_else(|| {
            AppError::InternalError(format!(
                "booking {} references missing client {}",
                booking.id, booking.client_id
            ))
        })?;
    let provider = ProviderRepo::find_summary(&state.pool, booking.provider_id)
        .await?
        .ok_or_else(|| {
            AppError::InternalError(format!(
                "booking {} references missing provider {}",
                booking.id, booking.provider_id
            ))
        })?;

    Ok(Json(DataResponse {
        data: BookingDetailResponse {
            booking: BookingResponse::from(booking),
            client,
            provider,
        },
    }))
}

/// PATCH /api/v1/bookings/{id}/status
///
/// Apply a lifecycle transition. The legality of the edge and the caller's
/// entitlement are decided by the core predicate; the write itself is a
/// conditional update keyed on the current status, so a concurrent racer
/// gets the invalid-transition error instead of double-applying.
pub async fn update_status(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStatusRequest>,
) -> AppResult<impl IntoResponse> {
    let booking = fetch_booking(&state, id).await?;
    let requested = BookingStatus::parse(&input.status)?;
    let current = booking.status()?;

    let owner_id = provider_user_id(&state, &booking).await?;
    let party = party_of(booking.client_id, owner_id, auth.user_id, auth.role);

    authorize_transition(current, requested, party)?;

    let updated = BookingRepo::transition(
        &state.pool,
        id,
        current,
        requested,
        input.cancellation_reason.as_deref(),
    )
    .await?
    .ok_or_else(|| {
        // The row moved under us: a concurrent request won the conditional
        // update. For the caller this is exactly an illegal transition.
        AppError::Core(CoreError::Validation(messages::invalid_transition(
            current.as_str(),
            requested.as_str(),
        )))
    })?;

    tracing::info!(
        booking_id = id,
        user_id = auth.user_id,
        from = current.as_str(),
        to = requested.as_str(),
        "Booking status updated"
    );

    Ok(Json(DataResponse {
        data: BookingResponse::from(updated),
    }))
}

/// DELETE /api/v1/bookings/{id}
///
/// Hard-delete a booking (admin only). Does not go through the state
/// machine; the dependent review, if any, is removed by the FK cascade.
pub async fn delete_booking(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = BookingRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Booking",
            id,
        }));
    }

    tracing::info!(booking_id = id, admin_id = admin.user_id, "Booking deleted");

    Ok(Json(MessageResponse {
        message: "Solicitud eliminada".into(),
    }))
}
