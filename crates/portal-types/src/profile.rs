//! Role-specific profile records and the resolved profile union.

use crate::Role;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Donor profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Account UUID
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// National IC number (the donor's login identifier)
    pub ic_number: String,
    /// Contact email (optional for donors)
    #[serde(default)]
    pub email: Option<String>,
    /// Blood type, e.g. "A+", "O-"
    pub blood_type: String,
    /// Whether the donor is currently eligible to donate
    pub is_eligible: bool,
}

/// Event organiser profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganiserProfile {
    /// Account UUID
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Login email
    pub email: String,
    /// Organisation the organiser represents
    #[serde(default)]
    pub organisation: Option<String>,
}

/// Collection facility profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityProfile {
    /// Account UUID
    pub id: Uuid,
    /// Facility name
    pub name: String,
    /// Login email
    pub email: String,
    /// Street address shown to donors
    pub address: String,
    /// Contact phone number
    #[serde(default)]
    pub phone: Option<String>,
}

/// Administrator profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    /// Account UUID
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Login email
    pub email: String,
}

/// A resolved identity: exactly one of the four role-specific records.
///
/// The gateway decodes the portal's discriminated credential response into
/// this union once; consumers match on it instead of re-sniffing response
/// keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Profile {
    User(UserProfile),
    Organiser(OrganiserProfile),
    Facility(FacilityProfile),
    Admin(AdminProfile),
}

impl Profile {
    /// The role tag of this profile.
    pub fn role(&self) -> Role {
        match self {
            Profile::User(_) => Role::User,
            Profile::Organiser(_) => Role::Organiser,
            Profile::Facility(_) => Role::Facility,
            Profile::Admin(_) => Role::Admin,
        }
    }

    /// Account UUID, regardless of role.
    pub fn id(&self) -> Uuid {
        match self {
            Profile::User(p) => p.id,
            Profile::Organiser(p) => p.id,
            Profile::Facility(p) => p.id,
            Profile::Admin(p) => p.id,
        }
    }

    /// Display name, regardless of role.
    pub fn display_name(&self) -> &str {
        match self {
            Profile::User(p) => &p.name,
            Profile::Organiser(p) => &p.name,
            Profile::Facility(p) => &p.name,
            Profile::Admin(p) => &p.name,
        }
    }
}
