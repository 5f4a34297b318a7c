//! Session manager error type.

use portal_storage::StorageError;
use portal_types::GatewayError;
use thiserror::Error;

/// Errors from session operations.
#[derive(Error, Debug)]
pub enum SessionError {
    /// The gateway rejected or failed the call.
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// The token vault could not be read or written.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The completion arrived after a newer session change and was
    /// discarded without touching any state.
    #[error("Operation superseded by a newer session change")]
    Superseded,
}
