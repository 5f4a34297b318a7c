//! The token-pair vault.

use crate::{FileStorage, MemoryStorage, SecureStorage, StorageKeys, StorageResult};
use portal_types::TokenPair;
use std::path::PathBuf;

/// Persistent store for the portal token pair.
///
/// Invariant: through every vault operation, storage holds either both
/// tokens or neither. A half-present pair found in storage is treated as
/// corrupt, cleared, and reported as absent.
pub struct TokenVault {
    storage: Box<dyn SecureStorage>,
}

impl TokenVault {
    /// Create a vault over the given storage backend.
    pub fn new(storage: Box<dyn SecureStorage>) -> Self {
        Self { storage }
    }

    /// Create a vault backed by the credentials file at `path`.
    pub fn file(path: PathBuf) -> StorageResult<Self> {
        Ok(Self::new(Box::new(FileStorage::open(path)?)))
    }

    /// Create a vault that forgets everything on restart.
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStorage::new()))
    }

    /// Store the token pair. If the second write fails, the first is rolled
    /// back so storage never holds a lone access token.
    pub fn store(&self, pair: &TokenPair) -> StorageResult<()> {
        self.storage.set(StorageKeys::ACCESS_TOKEN, &pair.access)?;
        if let Err(err) = self.storage.set(StorageKeys::REFRESH_TOKEN, &pair.refresh) {
            let _ = self.storage.delete(StorageKeys::ACCESS_TOKEN);
            return Err(err);
        }
        Ok(())
    }

    /// Load the token pair, if both halves are present.
    pub fn load(&self) -> StorageResult<Option<TokenPair>> {
        let access = self.storage.get(StorageKeys::ACCESS_TOKEN)?;
        let refresh = self.storage.get(StorageKeys::REFRESH_TOKEN)?;
        match (access, refresh) {
            (Some(access), Some(refresh)) => Ok(Some(TokenPair::new(access, refresh))),
            (None, None) => Ok(None),
            _ => {
                tracing::warn!("Half-present token pair in storage, clearing");
                self.clear()?;
                Ok(None)
            }
        }
    }

    /// The stored access token, if a full pair is present.
    pub fn access_token(&self) -> StorageResult<Option<String>> {
        Ok(self.load()?.map(|pair| pair.access))
    }

    /// The stored refresh token, if a full pair is present.
    pub fn refresh_token(&self) -> StorageResult<Option<String>> {
        Ok(self.load()?.map(|pair| pair.refresh))
    }

    /// Whether a full token pair is stored.
    pub fn has_tokens(&self) -> StorageResult<bool> {
        Ok(self.load()?.is_some())
    }

    /// Delete both tokens.
    pub fn clear(&self) -> StorageResult<()> {
        let _ = self.storage.delete(StorageKeys::ACCESS_TOKEN);
        let _ = self.storage.delete(StorageKeys::REFRESH_TOKEN);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{StorageError, StorageResult};
    use std::sync::Mutex;

    /// Storage that fails every write after the first `allow_writes`.
    struct FlakyStorage {
        inner: MemoryStorage,
        writes_left: Mutex<u32>,
    }

    impl FlakyStorage {
        fn failing_after(allow_writes: u32) -> Self {
            Self {
                inner: MemoryStorage::new(),
                writes_left: Mutex::new(allow_writes),
            }
        }
    }

    impl SecureStorage for FlakyStorage {
        fn set(&self, key: &str, value: &str) -> StorageResult<()> {
            let mut left = self.writes_left.lock().unwrap();
            if *left == 0 {
                return Err(StorageError::Backend("disk full".to_string()));
            }
            *left -= 1;
            self.inner.set(key, value)
        }

        fn get(&self, key: &str) -> StorageResult<Option<String>> {
            self.inner.get(key)
        }

        fn delete(&self, key: &str) -> StorageResult<bool> {
            self.inner.delete(key)
        }
    }

    #[test]
    fn store_and_load_pair() {
        let vault = TokenVault::in_memory();
        let pair = TokenPair::new("acc", "ref");

        vault.store(&pair).unwrap();
        assert_eq!(vault.load().unwrap(), Some(pair));
        assert!(vault.has_tokens().unwrap());
        assert_eq!(vault.access_token().unwrap(), Some("acc".to_string()));
        assert_eq!(vault.refresh_token().unwrap(), Some("ref".to_string()));
    }

    #[test]
    fn clear_removes_both() {
        let vault = TokenVault::in_memory();
        vault.store(&TokenPair::new("acc", "ref")).unwrap();

        vault.clear().unwrap();
        assert_eq!(vault.load().unwrap(), None);
        assert!(!vault.has_tokens().unwrap());
    }

    #[test]
    fn partial_write_rolls_back() {
        let vault = TokenVault::new(Box::new(FlakyStorage::failing_after(1)));

        let err = vault.store(&TokenPair::new("acc", "ref")).unwrap_err();
        assert!(matches!(err, StorageError::Backend(_)));

        // The lone access token written before the failure must be gone.
        assert_eq!(vault.load().unwrap(), None);
    }

    #[test]
    fn half_present_pair_is_repaired() {
        let storage = MemoryStorage::new();
        storage.set(StorageKeys::ACCESS_TOKEN, "orphan").unwrap();
        let vault = TokenVault::new(Box::new(storage));

        assert_eq!(vault.load().unwrap(), None);
        // Repair is persistent: the orphan half was deleted.
        assert!(!vault.has_tokens().unwrap());
    }

    #[test]
    fn overwrite_replaces_previous_pair() {
        let vault = TokenVault::in_memory();
        vault.store(&TokenPair::new("a1", "r1")).unwrap();
        vault.store(&TokenPair::new("a2", "r2")).unwrap();

        assert_eq!(vault.load().unwrap(), Some(TokenPair::new("a2", "r2")));
    }
}
