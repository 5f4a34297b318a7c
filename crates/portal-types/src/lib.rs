//! Shared domain types for the Hemolink portal client.
//!
//! This crate defines:
//! - The four portal roles and their profile records
//! - The `Profile` tagged union resolved at the gateway boundary
//! - Notification and token-pair records
//! - The `GatewayError` taxonomy shared by every portal operation

mod error;
mod notification;
mod profile;
mod role;
mod tokens;

pub use error::{GatewayError, GatewayResult};
pub use notification::Notification;
pub use profile::{AdminProfile, FacilityProfile, OrganiserProfile, Profile, UserProfile};
pub use role::Role;
pub use tokens::TokenPair;
