//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - Embedded summary structs for responses that join related rows

pub mod booking;
pub mod provider;
pub mod review;
pub mod user;
