//! Login request and outcome types.

use portal_types::{Profile, Role, TokenPair};

/// A role-specific login request.
///
/// Donors identify with their IC number; every other role identifies with
/// an email address.
#[derive(Debug, Clone)]
pub enum LoginRequest {
    User { ic_number: String, password: String },
    Organiser { email: String, password: String },
    Facility { email: String, password: String },
    Admin { email: String, password: String },
}

impl LoginRequest {
    /// The role whose login endpoint this request targets.
    pub fn role(&self) -> Role {
        match self {
            LoginRequest::User { .. } => Role::User,
            LoginRequest::Organiser { .. } => Role::Organiser,
            LoginRequest::Facility { .. } => Role::Facility,
            LoginRequest::Admin { .. } => Role::Admin,
        }
    }

    /// The identifier field (IC number or email).
    pub fn identifier(&self) -> &str {
        match self {
            LoginRequest::User { ic_number, .. } => ic_number,
            LoginRequest::Organiser { email, .. }
            | LoginRequest::Facility { email, .. }
            | LoginRequest::Admin { email, .. } => email,
        }
    }

    /// JSON request body for the login endpoint.
    pub(crate) fn body(&self) -> serde_json::Value {
        match self {
            LoginRequest::User { ic_number, password } => serde_json::json!({
                "icNumber": ic_number,
                "password": password,
            }),
            LoginRequest::Organiser { email, password }
            | LoginRequest::Facility { email, password }
            | LoginRequest::Admin { email, password } => serde_json::json!({
                "email": email,
                "password": password,
            }),
        }
    }
}

/// A successful login: the issued token pair and the resolved profile.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub tokens: TokenPair,
    pub profile: Profile,
}
