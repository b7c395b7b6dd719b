//! Request handlers.
//!
//! Each submodule provides async handler functions for a single resource.
//! Handlers delegate persistence to the repositories in `oficios_db`,
//! lifecycle/gating decisions to `oficios_core`, and map errors via
//! [`AppError`](crate::error::AppError).

pub mod booking;
pub mod review;
