//! # Key-value persistence
//!
//! The session lives in a tiny string-keyed store, the same shape as the
//! `AsyncStorage`-style storage found on every mobile platform. [`KeyValueStore`] is
//! the async seam; [`crate::MemoryStore`] and [`crate::FileStore`] implement it.
//!
//! Values are plain strings. There is no schema versioning and no change
//! notification: readers load what they need when a screen mounts.

use thiserror::Error;

/// Errors raised by a [`KeyValueStore`] backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored value for `{key}` is not valid UTF-8")]
    InvalidValue { key: String },

    #[error("`{key}` is not a valid storage key")]
    InvalidKey { key: String },
}

/// Async string-keyed storage.
pub trait KeyValueStore {
    fn get(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>, StoreError>>;
    fn set(
        &self,
        key: &str,
        value: &str,
    ) -> impl std::future::Future<Output = Result<(), StoreError>>;
    /// Remove a key. Removing a key that was never set succeeds.
    fn remove(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<(), StoreError>>;
}
