//! Session management for the Hemolink portal client.
//!
//! This crate owns the single source of truth for "who is logged in": a
//! process-wide session resolved against the Credential Gateway, persisted
//! only as a token pair, and guarded against out-of-order async completions
//! with an epoch counter.

mod error;
mod manager;
mod status;

pub use error::SessionError;
pub use manager::{SessionManager, SessionSnapshot};
pub use status::{is_valid_transition, SessionStatus};
