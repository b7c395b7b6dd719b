//! Marketplace roles.
//!
//! Every authenticated principal carries exactly one role in its JWT claims.
//! The wire names must match the values stored in the `users.role` column.

use serde::{Deserialize, Serialize};

pub const ROLE_CLIENT: &str = "client";
pub const ROLE_PROVIDER: &str = "provider";
pub const ROLE_ADMIN: &str = "admin";

/// Closed role set. Parse at the boundary, match on the enum everywhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Client,
    Provider,
    Admin,
}

impl Role {
    /// Wire name as stored in JWT claims and the `users.role` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Client => ROLE_CLIENT,
            Role::Provider => ROLE_PROVIDER,
            Role::Admin => ROLE_ADMIN,
        }
    }

    /// Parse a wire name. Returns `None` for anything outside the closed set.
    pub fn parse(s: &str) -> Option<Role> {
        match s {
            ROLE_CLIENT => Some(Role::Client),
            ROLE_PROVIDER => Some(Role::Provider),
            ROLE_ADMIN => Some(Role::Admin),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_all_roles() {
        for role in [Role::Client, Role::Provider, Role::Admin] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
    }

    #[test]
    fn test_unknown_role_rejected() {
        assert_eq!(Role::parse("superuser"), None);
        assert_eq!(Role::parse(""), None);
        assert_eq!(Role::parse("Admin"), None);
    }
}
