//! Portal role definitions.

use serde::{Deserialize, Serialize};

/// The four mutually exclusive identity classes of the portal.
///
/// Every authenticated session resolves to exactly one role, and every
/// notification mailbox is scoped to exactly one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Blood donor account, identified by IC number.
    User,
    /// Event organiser account, identified by email.
    Organiser,
    /// Collection facility account, identified by email.
    Facility,
    /// Portal administrator account, identified by email.
    Admin,
}

impl Role {
    /// Wire name used in endpoint paths (`/auth/{role}/login`,
    /// `/{role}-notifications`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Organiser => "organiser",
            Role::Facility => "facility",
            Role::Admin => "admin",
        }
    }

    /// All roles, in display order.
    pub fn all() -> [Role; 4] {
        [Role::User, Role::Organiser, Role::Facility, Role::Admin]
    }

    /// Parse a wire name back into a role.
    pub fn parse(value: &str) -> Option<Role> {
        match value {
            "user" => Some(Role::User),
            "organiser" => Some(Role::Organiser),
            "facility" => Some(Role::Facility),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
