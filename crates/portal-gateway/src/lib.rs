//! Credential Gateway client for the Hemolink portal.
//!
//! This crate is the one place that knows the portal's wire format. It
//! provides:
//! - `CredentialGateway`: the async trait the session manager and
//!   notification center are written against
//! - `GatewayClient`: the reqwest implementation over the portal REST API
//! - One-shot decoding of the discriminated "who am I" response into the
//!   `Profile` union, and wire-error mapping into the `GatewayError`
//!   taxonomy

mod client;
mod gateway;
mod login;

pub use client::GatewayClient;
pub use gateway::CredentialGateway;
pub use login::{LoginOutcome, LoginRequest};
