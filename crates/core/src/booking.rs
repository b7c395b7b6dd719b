//! Booking lifecycle: status set, transition table, and the authorization
//! predicate that decides which party may drive which edge.
//!
//! The legal graph:
//!
//! ```text
//! pending -> accepted -> confirmed -> in_progress -> completed
//!    |           |            |
//!    |           +-----> in_progress
//!    +-> rejected
//!    +-> cancelled   (also reachable from accepted and confirmed)
//! ```
//!
//! `rejected`, `cancelled` and `completed` are terminal. The repository layer
//! applies a transition as a single conditional UPDATE keyed on the current
//! status, so this table is the only place legality is decided and a racing
//! request cannot sneak a second transition through.

use crate::error::CoreError;
use crate::messages;
use crate::roles::Role;
use crate::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};

/// Closed booking status set. Stored in `bookings.status` as the snake_case
/// wire name; parsed back into the enum before any decision is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Accepted,
    Confirmed,
    InProgress,
    Completed,
    Rejected,
    Cancelled,
}

/// All statuses, in lifecycle order. Handy for CHECK constraints and tests.
pub const ALL_STATUSES: &[BookingStatus] = &[
    BookingStatus::Pending,
    BookingStatus::Accepted,
    BookingStatus::Confirmed,
    BookingStatus::InProgress,
    BookingStatus::Completed,
    BookingStatus::Rejected,
    BookingStatus::Cancelled,
];

impl BookingStatus {
    /// Wire name as stored in the `bookings.status` column.
    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Accepted => "accepted",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::InProgress => "in_progress",
            BookingStatus::Completed => "completed",
            BookingStatus::Rejected => "rejected",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Parse a wire name, rejecting anything outside the closed set.
    pub fn parse(s: &str) -> Result<BookingStatus, CoreError> {
        ALL_STATUSES
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!("{}: '{s}'", messages::MSG_UNKNOWN_STATUS))
            })
    }

    /// Terminal statuses admit no further transition.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            BookingStatus::Completed | BookingStatus::Rejected | BookingStatus::Cancelled
        )
    }

    /// The write-once timestamp column stamped when a booking enters this
    /// status. `None` for `pending`, which is only ever the initial state.
    pub fn timestamp_column(self) -> Option<&'static str> {
        match self {
            BookingStatus::Pending => None,
            BookingStatus::Accepted => Some("accepted_at"),
            BookingStatus::Confirmed => Some("confirmed_at"),
            BookingStatus::InProgress => Some("started_at"),
            BookingStatus::Completed => Some("completed_at"),
            BookingStatus::Rejected => Some("rejected_at"),
            BookingStatus::Cancelled => Some("cancelled_at"),
        }
    }
}

/// Whether `from -> to` is an edge of the legal transition graph.
pub fn can_transition(from: BookingStatus, to: BookingStatus) -> bool {
    use BookingStatus::*;
    matches!(
        (from, to),
        (Pending, Accepted)
            | (Pending, Rejected)
            | (Pending, Cancelled)
            | (Accepted, Confirmed)
            | (Accepted, InProgress)
            | (Accepted, Cancelled)
            | (Confirmed, InProgress)
            | (Confirmed, Cancelled)
            | (InProgress, Completed)
    )
}

/// The caller's relationship to a specific booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Party {
    /// The client who created the booking.
    Client,
    /// The owner of the provider profile the booking references.
    Provider,
    /// An administrator (related or not).
    Admin,
    /// Authenticated, but unrelated to this booking.
    Stranger,
}

/// Resolve which party the caller is with respect to a booking.
///
/// `provider_user_id` is the user who owns the booking's provider profile
/// (bookings reference profiles, not raw user ids).
pub fn party_of(
    booking_client_id: DbId,
    provider_user_id: DbId,
    caller_id: DbId,
    caller_role: Role,
) -> Party {
    match caller_role {
        Role::Admin => Party::Admin,
        Role::Client if caller_id == booking_client_id => Party::Client,
        Role::Provider if caller_id == provider_user_id => Party::Provider,
        _ => Party::Stranger,
    }
}

/// Authorization predicate for a status transition.
///
/// Checked in order: the caller must be a party to the booking, the edge
/// must exist in the graph, and the edge must be driven by the right party.
/// Strangers get `Forbidden`, illegal edges get `Validation`, wrong-party
/// requests on legal edges get `Forbidden`.
pub fn authorize_transition(
    current: BookingStatus,
    requested: BookingStatus,
    party: Party,
) -> Result<(), CoreError> {
    if party == Party::Stranger {
        return Err(CoreError::Forbidden(messages::MSG_NOT_BOOKING_PARTY.into()));
    }

    if !can_transition(current, requested) {
        return Err(CoreError::Validation(messages::invalid_transition(
            current.as_str(),
            requested.as_str(),
        )));
    }

    let allowed = match requested {
        BookingStatus::Accepted | BookingStatus::Rejected => party == Party::Provider,
        BookingStatus::InProgress | BookingStatus::Completed => party == Party::Provider,
        BookingStatus::Confirmed => party == Party::Client,
        BookingStatus::Cancelled => matches!(party, Party::Client | Party::Admin),
        // No edge leads back into `pending`; can_transition already rejected it.
        BookingStatus::Pending => false,
    };

    if allowed {
        Ok(())
    } else {
        let msg = match requested {
            BookingStatus::Accepted | BookingStatus::Rejected => {
                messages::MSG_ONLY_PROVIDER_DECIDES
            }
            BookingStatus::InProgress | BookingStatus::Completed => {
                messages::MSG_ONLY_PROVIDER_WORKS
            }
            BookingStatus::Confirmed => messages::MSG_ONLY_CLIENT_CONFIRMS,
            _ => messages::MSG_ONLY_CLIENT_CANCELS,
        };
        Err(CoreError::Forbidden(msg.into()))
    }
}

/// Validate the input of a new booking request.
///
/// `now` is passed in rather than read from the clock so the rule is
/// deterministic under test. The service date must be strictly in the
/// future and the description must be non-empty.
pub fn validate_new_booking(
    description: &str,
    service_date: Timestamp,
    now: Timestamp,
) -> Result<(), CoreError> {
    if description.trim().is_empty() {
        return Err(CoreError::Validation(
            messages::MSG_MISSING_REQUIRED_FIELDS.into(),
        ));
    }
    if service_date <= now {
        return Err(CoreError::Validation(
            messages::MSG_SERVICE_DATE_FUTURE.into(),
        ));
    }
    Ok(())
}

/// Extract the urgency level a client may have embedded in their notes as a
/// `Urgencia: <nivel>` line. Display logic surfaces it as its own field;
/// the notes text itself is stored untouched.
pub fn extract_urgency(client_notes: Option<&str>) -> Option<String> {
    let notes = client_notes?;
    for line in notes.lines() {
        let trimmed = line.trim();
        let rest = trimmed
            .strip_prefix("Urgencia:")
            .or_else(|| trimmed.strip_prefix("urgencia:"));
        if let Some(rest) = rest {
            let level = rest.trim();
            if !level.is_empty() {
                return Some(level.to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn test_status_roundtrip() {
        for status in ALL_STATUSES.iter().copied() {
            assert_eq!(BookingStatus::parse(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn test_unknown_status_rejected() {
        let err = BookingStatus::parse("archived").unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn test_terminal_statuses_have_no_outgoing_edges() {
        for from in ALL_STATUSES.iter().copied().filter(|s| s.is_terminal()) {
            for to in ALL_STATUSES.iter().copied() {
                assert!(
                    !can_transition(from, to),
                    "{} must be terminal but allows {}",
                    from.as_str(),
                    to.as_str()
                );
            }
        }
    }

    #[test]
    fn test_exact_edge_set() {
        use BookingStatus::*;
        let legal = [
            (Pending, Accepted),
            (Pending, Rejected),
            (Pending, Cancelled),
            (Accepted, Confirmed),
            (Accepted, InProgress),
            (Accepted, Cancelled),
            (Confirmed, InProgress),
            (Confirmed, Cancelled),
            (InProgress, Completed),
        ];
        for from in ALL_STATUSES.iter().copied() {
            for to in ALL_STATUSES.iter().copied() {
                let expected = legal.contains(&(from, to));
                assert_eq!(
                    can_transition(from, to),
                    expected,
                    "edge {} -> {}",
                    from.as_str(),
                    to.as_str()
                );
            }
        }
    }

    #[test]
    fn test_completed_not_reachable_from_pending_or_accepted() {
        assert!(!can_transition(BookingStatus::Pending, BookingStatus::Completed));
        assert!(!can_transition(BookingStatus::Accepted, BookingStatus::Completed));
    }

    #[test]
    fn test_every_non_initial_status_has_a_timestamp_column() {
        assert_eq!(BookingStatus::Pending.timestamp_column(), None);
        for status in ALL_STATUSES.iter().copied() {
            if status != BookingStatus::Pending {
                assert!(status.timestamp_column().is_some());
            }
        }
    }

    #[test]
    fn test_party_resolution() {
        assert_eq!(party_of(1, 2, 1, Role::Client), Party::Client);
        assert_eq!(party_of(1, 2, 2, Role::Provider), Party::Provider);
        assert_eq!(party_of(1, 2, 99, Role::Admin), Party::Admin);
        // A client id matching the provider's user id does not make them
        // the provider, and vice versa.
        assert_eq!(party_of(1, 2, 2, Role::Client), Party::Stranger);
        assert_eq!(party_of(1, 2, 1, Role::Provider), Party::Stranger);
        assert_eq!(party_of(1, 2, 7, Role::Client), Party::Stranger);
    }

    #[test]
    fn test_provider_accepts_and_rejects() {
        for to in [BookingStatus::Accepted, BookingStatus::Rejected] {
            assert!(authorize_transition(BookingStatus::Pending, to, Party::Provider).is_ok());
            let err =
                authorize_transition(BookingStatus::Pending, to, Party::Client).unwrap_err();
            assert!(matches!(err, CoreError::Forbidden(_)));
        }
    }

    #[test]
    fn test_admin_may_not_accept_for_the_provider() {
        let err = authorize_transition(
            BookingStatus::Pending,
            BookingStatus::Accepted,
            Party::Admin,
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::Forbidden(_)));
    }

    #[test]
    fn test_client_or_admin_cancels() {
        for party in [Party::Client, Party::Admin] {
            assert!(authorize_transition(
                BookingStatus::Pending,
                BookingStatus::Cancelled,
                party
            )
            .is_ok());
            assert!(authorize_transition(
                BookingStatus::Accepted,
                BookingStatus::Cancelled,
                party
            )
            .is_ok());
        }
        let err = authorize_transition(
            BookingStatus::Pending,
            BookingStatus::Cancelled,
            Party::Provider,
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::Forbidden(_)));
    }

    #[test]
    fn test_stranger_always_forbidden() {
        let err = authorize_transition(
            BookingStatus::Pending,
            BookingStatus::Accepted,
            Party::Stranger,
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::Forbidden(_)));
    }

    #[test]
    fn test_illegal_edge_is_validation_not_forbidden() {
        // The provider is the right party for `completed`, but the edge from
        // `accepted` does not exist: work must pass through `in_progress`.
        let err = authorize_transition(
            BookingStatus::Accepted,
            BookingStatus::Completed,
            Party::Provider,
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn test_full_happy_path_edges() {
        assert!(authorize_transition(
            BookingStatus::Pending,
            BookingStatus::Accepted,
            Party::Provider
        )
        .is_ok());
        assert!(authorize_transition(
            BookingStatus::Accepted,
            BookingStatus::Confirmed,
            Party::Client
        )
        .is_ok());
        assert!(authorize_transition(
            BookingStatus::Confirmed,
            BookingStatus::InProgress,
            Party::Provider
        )
        .is_ok());
        assert!(authorize_transition(
            BookingStatus::InProgress,
            BookingStatus::Completed,
            Party::Provider
        )
        .is_ok());
    }

    #[test]
    fn test_new_booking_requires_future_date() {
        let now = Utc::now();
        let err = validate_new_booking("Reparar la cocina", now, now).unwrap_err();
        match err {
            CoreError::Validation(msg) => assert!(msg.contains("futuro")),
            other => panic!("expected Validation, got {other:?}"),
        }
        let err =
            validate_new_booking("Reparar la cocina", now - Duration::days(1), now).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(validate_new_booking("Reparar la cocina", now + Duration::days(1), now).is_ok());
    }

    #[test]
    fn test_new_booking_requires_description() {
        let now = Utc::now();
        let err = validate_new_booking("   ", now + Duration::days(1), now).unwrap_err();
        match err {
            CoreError::Validation(msg) => assert!(msg.contains("obligatorios")),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_urgency_extraction() {
        assert_eq!(
            extract_urgency(Some("Urgencia: alta\nSe rompió el caño")),
            Some("alta".to_string())
        );
        assert_eq!(
            extract_urgency(Some("Se rompió el caño\nurgencia: media")),
            Some("media".to_string())
        );
        assert_eq!(extract_urgency(Some("Se rompió el caño")), None);
        assert_eq!(extract_urgency(Some("Urgencia:   ")), None);
        assert_eq!(extract_urgency(None), None);
    }
}
