//! Domain core for the Oficios marketplace backend.
//!
//! Pure logic only: no async, no database, no HTTP. The API and repository
//! layers both depend on this crate, so the booking state machine and the
//! review-gating rules are testable without any infrastructure.

pub mod booking;
pub mod error;
pub mod messages;
pub mod review;
pub mod roles;
pub mod types;
