//! Notification center error type.

use portal_types::GatewayError;
use thiserror::Error;

/// Errors from mailbox operations.
#[derive(Error, Debug)]
pub enum NotifyError {
    /// The gateway rejected or failed the call.
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// No access token is available; the mailbox needs an authenticated
    /// session.
    #[error("No authenticated session for mailbox access")]
    NoSession,
}
