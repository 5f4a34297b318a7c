//! Token storage for the Hemolink portal client.
//!
//! This crate provides:
//! - A `SecureStorage` trait over simple key-value backends
//! - `FileStorage`: JSON file persistence surviving restarts
//! - `MemoryStorage`: non-persistent storage for tests and "this session only" mode
//! - `TokenVault`: the token-pair store, which guarantees the access and
//!   refresh tokens are always stored both-or-neither

mod file;
mod keys;
mod memory;
mod traits;
mod vault;

pub use file::FileStorage;
pub use keys::StorageKeys;
pub use memory::MemoryStorage;
pub use traits::SecureStorage;
pub use vault::TokenVault;

use thiserror::Error;

/// Error type for storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Backend-specific storage error
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// Key not found
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Encoding/decoding error
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
